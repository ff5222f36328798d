//! Prediction identifier injection
//!
//! Every prediction leaving this layer carries a unique identifier: the one
//! the caller supplied, or a freshly generated UUID v4. Both contracts are
//! widened to advertise the field (optional on input, required on output).

use crate::config::DecoratorConfig;
use crate::decorator::{Decoration, Layer};
use crate::error::{DecoratorError, PredictResult};
use mld_contract::{json_type_name, Contract, ContractError, FieldDescriptor, FieldType, Record};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Field name used when the configuration does not set `field`
pub const DEFAULT_FIELD: &str = "identifier";

/// Injects a caller-supplied or generated identifier into every prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionId {
    field: String,
}

impl PredictionId {
    /// Decoration writing `field`
    #[inline]
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Name of the injected field
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    fn descriptor(&self, required: bool) -> FieldDescriptor {
        let descriptor = if required {
            FieldDescriptor::required(FieldType::String)
        } else {
            FieldDescriptor::optional(FieldType::String)
        };
        descriptor.with_metadata(
            "description",
            "Unique identifier of the prediction (UUID string).",
        )
    }

    fn supplied(&self, input: &Record) -> Result<Option<String>, ContractError> {
        match input.get_present(&self.field) {
            None => Ok(None),
            Some(Value::String(id)) => Ok(Some(id.clone())),
            Some(other) => Err(ContractError::TypeMismatch {
                field: self.field.clone(),
                expected: FieldType::String.to_string(),
                actual: json_type_name(other).to_string(),
            }),
        }
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD)
    }
}

impl Decoration for PredictionId {
    fn from_config(config: &DecoratorConfig) -> Result<Self, DecoratorError> {
        Ok(Self::new(config.optional_str("field")?.unwrap_or(DEFAULT_FIELD)))
    }

    fn description(&self, layer: Layer<'_>) -> String {
        format!(
            "{} This model also accepts an optional input called '{field}' holding a UUID \
             string that uniquely identifies the prediction. If it is not provided, a UUID is \
             generated. The identifier is returned in a field called '{field}' in the model \
             output.",
            layer.wrapped().description(),
            field = self.field,
        )
    }

    fn input_contract(&self, layer: Layer<'_>) -> Arc<Contract> {
        let base = layer.wrapped().input_contract();
        Arc::new(base.extend([(self.field.as_str(), self.descriptor(false))]))
    }

    fn output_contract(&self, layer: Layer<'_>) -> Arc<Contract> {
        let base = layer.wrapped().output_contract();
        Arc::new(base.extend([(self.field.as_str(), self.descriptor(true))]))
    }

    fn predict(&self, layer: Layer<'_>, input: &Record) -> PredictResult<Record> {
        let supplied = self.supplied(input)?;
        let mut prediction = layer.wrapped().predict(input)?;

        let identifier = supplied.unwrap_or_else(|| Uuid::new_v4().to_string());
        prediction.insert(self.field.clone(), identifier);

        Ok(self.output_contract(layer).instantiate(prediction)?)
    }
}
