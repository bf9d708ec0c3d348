//! Parameter fingerprinting: deterministic identification of indicator configurations.
//!
//! Two indicators built from identical parameters share a `ParamsHash`, so
//! their cached entries are interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 hex digest of a parameter set's canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamsHash(pub String);

impl ParamsHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// Hash of `value` serialized to JSON.
    ///
    /// Struct fields serialize in declaration order, so the JSON is
    /// deterministic for the parameter types in this crate.
    pub fn of<T: Serialize>(value: &T) -> Self {
        let json = serde_json::to_string(value).expect("indicator params must serialize");
        Self::from_bytes(json.as_bytes())
    }

    /// First 12 hex characters, for log lines and CLI output.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for ParamsHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
