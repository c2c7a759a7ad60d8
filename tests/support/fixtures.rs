//! Test fixtures and constants.

/// Namespace registered by [`super::registry`].
pub const TEST_NAMESPACE: &str = "testnamespace";

/// Credentials accepted by the test namespace.
pub const CREDENTIALS: &[&str] = &[
    r#"{"x": 1}"#,
    r#"{"password": 12345}"#,
    r#"{"token": "djkqfljfqm"}"#,
    r#"{"&é": "'(§è!ç"}"#,
];

/// Not JSON at all.
pub const MALFORMED_JSON: &[&str] = &[
    "{'hi': 'o'}",
    r#"{"oq", [>}"#,
    r#"{"foo": ["bar", "baz", ]}"#,
];

/// Well-formed JSON the test namespace rejects.
pub const REJECTED_JSON: &[&str] = &["{}", "[]", "[1, 2, 3]", r#"{"a": 1, "b": 2, "c": 3}"#];

/// Symmetric key values that must never be accepted.
pub const INVALID_KEYS: &[&str] = &["", "not", "0000000000000000000000000000000", "$key"];
