//! Test assertion helpers.

use keychain::{Error, ErrorKind, Result};

/// Assert that a result failed with a validation error.
#[track_caller]
pub fn assert_validation<T: std::fmt::Debug>(result: Result<T>) {
    match result {
        Err(e) => assert_eq!(
            e.kind(),
            ErrorKind::Validation,
            "expected validation error, got: {e}"
        ),
        Ok(v) => panic!("expected validation error, got Ok({v:?})"),
    }
}

/// Assert that a result failed with an operational (key/crypto) error.
#[track_caller]
pub fn assert_operational<T: std::fmt::Debug>(result: Result<T>) -> Error {
    match result {
        Err(e) => {
            assert_eq!(
                e.kind(),
                ErrorKind::Operational,
                "expected operational error, got: {e}"
            );
            e
        }
        Ok(v) => panic!("expected operational error, got Ok({v:?})"),
    }
}
