//! Core library components.
//!
//! The credential pipeline: configuration snapshots, key resolution, the
//! symmetric and age codecs, namespace validation, and the controller that
//! ties them to an account.

pub mod account;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod keychain;
pub mod keys;
pub mod validation;
