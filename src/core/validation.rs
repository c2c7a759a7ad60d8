//! Credential payload validation.
//!
//! Secrets are JSON objects. Which objects are acceptable depends on the
//! namespace (the external service the secret belongs to); each namespace
//! registers a predicate in a [`NamespaceRegistry`] before any account of
//! that namespace is created.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result, ValidationError};

/// A parsed credentials payload.
pub type Payload = Map<String, Value>;

/// Namespace predicate: returns whether a payload is acceptable.
pub type Validator = Arc<dyn Fn(&Payload) -> bool + Send + Sync>;

/// Parse raw credentials text into a JSON object.
///
/// # Errors
///
/// Returns `ValidationError::MalformedJson` on a syntax error and
/// `ValidationError::NotAnObject` if the top-level value is not an object.
pub fn parse_payload(raw: &str) -> Result<Payload> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::NotAnObject {
            found: json_type(&other),
        }
        .into()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Maps namespace identifiers to their validators.
///
/// Shared behind an `Arc`; registration and lookup may happen from any thread.
#[derive(Default)]
pub struct NamespaceRegistry {
    validators: RwLock<HashMap<String, Validator>>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validator for `namespace`, replacing any previous one.
    pub fn register<F>(&self, namespace: impl Into<String>, validator: F)
    where
        F: Fn(&Payload) -> bool + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        debug!(namespace = %namespace, "registering namespace validator");

        let mut validators = self.validators.write().unwrap_or_else(|e| e.into_inner());
        validators.insert(namespace, Arc::new(validator));
    }

    /// Register a declarative [`NamespaceRule`].
    pub fn register_rule(&self, namespace: impl Into<String>, rule: NamespaceRule) {
        self.register(namespace, move |payload| rule.accepts(payload));
    }

    /// Check whether `namespace` has a validator.
    pub fn is_registered(&self, namespace: &str) -> bool {
        let validators = self.validators.read().unwrap_or_else(|e| e.into_inner());
        validators.contains_key(namespace)
    }

    /// Registered namespaces, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let validators = self.validators.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = validators.keys().cloned().collect();
        names.sort();
        names
    }

    /// Run the validator of `namespace` on `payload`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownNamespace` if nothing is registered for
    /// `namespace`.
    pub fn validate(&self, namespace: &str, payload: &Payload) -> Result<bool> {
        let validator = {
            let validators = self.validators.read().unwrap_or_else(|e| e.into_inner());
            validators
                .get(namespace)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownNamespace(namespace.to_string()))?
        };

        Ok(validator(payload))
    }
}

impl fmt::Debug for NamespaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}

/// Declarative validator, configurable from the `[namespaces.<name>]` tables
/// of the config file.
///
/// Accepts a non-empty object containing every `required` key and, if
/// `max_keys` is set, no more than `max_keys` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRule {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_keys: Option<usize>,
}

impl NamespaceRule {
    pub fn accepts(&self, payload: &Payload) -> bool {
        if payload.is_empty() {
            return false;
        }
        if let Some(max) = self.max_keys {
            if payload.len() > max {
                return false;
            }
        }
        self.required.iter().all(|key| payload.contains_key(key))
    }
}
