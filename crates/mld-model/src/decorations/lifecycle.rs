//! Before/after prediction logging
//!
//! Overrides `predict` only. Emits a `tracing` event around every wrapped
//! call and hands the wrapped result back untouched.

use crate::config::DecoratorConfig;
use crate::decorator::{Decoration, Layer};
use crate::error::{DecoratorError, PredictResult};
use mld_contract::Record;
use std::time::Instant;

/// Logs every prediction passing through this layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleLogging {
    label: Option<String>,
}

impl LifecycleLogging {
    /// Decoration tagging events with `label`
    #[inline]
    #[must_use]
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    /// Label attached to events
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Decoration for LifecycleLogging {
    fn from_config(config: &DecoratorConfig) -> Result<Self, DecoratorError> {
        Ok(Self {
            label: config.optional_str("label")?.map(str::to_string),
        })
    }

    fn predict(&self, layer: Layer<'_>, input: &Record) -> PredictResult<Record> {
        let model = layer.wrapped().qualified_name();
        let label = self.label.as_deref().unwrap_or_default();

        tracing::info!(model = %model, label, fields = input.len(), "executing before prediction");
        let started = Instant::now();

        let result = layer.wrapped().predict(input);
        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(_) => {
                tracing::info!(model = %model, label, elapsed_us, "executing after prediction");
            }
            Err(e) => {
                tracing::warn!(model = %model, label, elapsed_us, error = %e, "prediction failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_config() {
        let config = DecoratorConfig::new().with("label", "edge");
        let decoration = LifecycleLogging::from_config(&config).unwrap();
        assert_eq!(decoration.label(), Some("edge"));

        let unlabelled = LifecycleLogging::from_config(&DecoratorConfig::new()).unwrap();
        assert_eq!(unlabelled, LifecycleLogging::default());
    }

    #[test]
    fn rejects_empty_label() {
        let config = DecoratorConfig::new().with("label", "");
        assert!(LifecycleLogging::from_config(&config).is_err());
    }
}
