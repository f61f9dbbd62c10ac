use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted value of one field: a scalar string for text, textarea,
/// checkbox, radio and select controls, a sequence of strings for
/// checkbox_array.
///
/// Serializes untagged so a stored mapping persists as a plain JSON object
/// of strings and string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Scalar(String),
    Many(Vec<String>),
}

impl StoredValue {
    #[must_use]
    pub fn scalar(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }

    #[must_use]
    pub fn many(values: Vec<String>) -> Self {
        Self::Many(values)
    }

    /// Scalar view; `None` for a sequence value.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Membership test: equality for a scalar, containment for a sequence.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Scalar(s) => s == value,
            Self::Many(values) => values.iter().any(|v| v == value),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::Many(values) => values.is_empty(),
        }
    }
}

/// Full value mapping persisted under one storage key, field id to value.
pub type StoredValues = BTreeMap<String, StoredValue>;
