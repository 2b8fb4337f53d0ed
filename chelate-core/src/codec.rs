//! JSON text codec.
//!
//! Values persist as UTF-8 JSON text with no embedded versioning or schema.
//! Callers wrap failures with the watched key into [`SyncError`] and route
//! them to the error sink; a decoding failure means the stored value is
//! treated as absent, never surfaced partially.
//!
//! [`SyncError`]: crate::SyncError

use serde_json::Value;

/// Encodes a value to JSON text.
pub fn encode(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Decodes JSON text to a value.
pub fn decode(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}
