//! Decorator configuration
//!
//! Open string-keyed map passed verbatim from the chain specification to a
//! decoration's constructor. It is not part of the forwarded surface.

use crate::error::DecoratorError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-decorator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecoratorConfig(IndexMap<String, Value>);

impl DecoratorConfig {
    /// Create empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or replace an entry
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value, if present and a string
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean value, if present and a boolean
    #[inline]
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Optional non-empty string entry
    ///
    /// # Errors
    /// `DecoratorError::InvalidConfiguration` if the entry is present but not
    /// a non-empty string
    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, DecoratorError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => {
                Err(DecoratorError::invalid_config(key, "must not be empty"))
            }
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(DecoratorError::invalid_config(
                key,
                format!("expected string, got {}", mld_contract::json_type_name(other)),
            )),
        }
    }

    /// Required non-empty string entry
    ///
    /// # Errors
    /// `DecoratorError::InvalidConfiguration` if the entry is missing or not a
    /// non-empty string
    pub fn require_str(&self, key: &str) -> Result<&str, DecoratorError> {
        self.optional_str(key)?
            .ok_or_else(|| DecoratorError::invalid_config(key, "is required"))
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if configuration is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DecoratorConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
