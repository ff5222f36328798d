//! Testing utilities for MLD workspace
//!
//! Shared model fixtures and helpers.

#![allow(missing_docs)]

use mld_contract::{Contract, FieldDescriptor, FieldType, Record};
use mld_model::{Model, ModelError, PredictResult};
use std::sync::Arc;

/// `{a:int}` → `{b:int}` with `b = 2a`
#[derive(Debug, Clone, Default)]
pub struct DoublingModel;

impl Model for DoublingModel {
    fn display_name(&self) -> String {
        "Doubling Model".to_string()
    }

    fn qualified_name(&self) -> String {
        "doubling_model".to_string()
    }

    fn description(&self) -> String {
        "Doubles its input.".to_string()
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }

    fn input_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelInput").field("a", FieldDescriptor::required(FieldType::Integer)))
    }

    fn output_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelOutput").field("b", FieldDescriptor::required(FieldType::Integer)))
    }

    fn predict(&self, input: &Record) -> PredictResult<Record> {
        let a = input
            .get_i64("a")
            .ok_or_else(|| ModelError::InvalidInput("field 'a' must be an integer".to_string()))?;
        let b = a
            .checked_mul(2)
            .ok_or_else(|| ModelError::prediction("doubling_model", format!("{a} * 2 overflows")))?;
        Ok(Record::new().with("b", b))
    }
}

/// Iris species classifier stand-in; always answers "Iris setosa"
#[derive(Debug, Clone, Default)]
pub struct IrisModel;

pub const IRIS_SPECIES: [&str; 3] = ["Iris setosa", "Iris versicolor", "Iris virginica"];

impl Model for IrisModel {
    fn display_name(&self) -> String {
        "Iris Model".to_string()
    }

    fn qualified_name(&self) -> String {
        "iris_model".to_string()
    }

    fn description(&self) -> String {
        "A model to predict the species of a flower based on its measurements.".to_string()
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }

    fn input_contract(&self) -> Arc<Contract> {
        let measurement = |gt: f64, lt: f64| {
            FieldDescriptor::required(FieldType::Number)
                .with_constraint("exclusiveMinimum", gt)
                .with_constraint("exclusiveMaximum", lt)
        };
        Arc::new(
            Contract::new("ModelInput")
                .field("sepal_length", measurement(5.0, 8.0))
                .field("sepal_width", measurement(2.0, 6.0))
                .field("petal_length", measurement(1.0, 6.8))
                .field("petal_width", measurement(0.0, 3.0)),
        )
    }

    fn output_contract(&self) -> Arc<Contract> {
        let species = IRIS_SPECIES.iter().map(ToString::to_string).collect();
        Arc::new(
            Contract::new("ModelOutput")
                .field("species", FieldDescriptor::required(FieldType::Enum(species))),
        )
    }

    fn predict(&self, _input: &Record) -> PredictResult<Record> {
        Ok(Record::new().with("species", IRIS_SPECIES[0]))
    }
}

/// Always fails with `ModelError::Prediction`
#[derive(Debug, Clone, Default)]
pub struct FailingModel;

impl Model for FailingModel {
    fn display_name(&self) -> String {
        "Failing Model".to_string()
    }

    fn qualified_name(&self) -> String {
        "failing_model".to_string()
    }

    fn description(&self) -> String {
        "Never predicts.".to_string()
    }

    fn version(&self) -> String {
        "0.0.1".to_string()
    }

    fn input_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelInput"))
    }

    fn output_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelOutput"))
    }

    fn predict(&self, _input: &Record) -> PredictResult<Record> {
        Err(failing_model_error())
    }
}

/// Error returned by [`FailingModel`]
pub fn failing_model_error() -> ModelError {
    ModelError::prediction("failing_model", "model is broken")
}

/// Surface with an empty qualified name; rejected by every decorator
#[derive(Debug, Clone, Default)]
pub struct BrokenIdentityModel;

impl Model for BrokenIdentityModel {
    fn display_name(&self) -> String {
        "Broken".to_string()
    }

    fn qualified_name(&self) -> String {
        String::new()
    }

    fn description(&self) -> String {
        String::new()
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }

    fn input_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelInput"))
    }

    fn output_contract(&self) -> Arc<Contract> {
        Arc::new(Contract::new("ModelOutput"))
    }

    fn predict(&self, _input: &Record) -> PredictResult<Record> {
        Ok(Record::new())
    }
}

pub fn doubling_model() -> Box<dyn Model> {
    Box::new(DoublingModel)
}

pub fn iris_model() -> Box<dyn Model> {
    Box::new(IrisModel)
}

pub fn doubling_input(a: i64) -> Record {
    Record::new().with("a", a)
}

pub fn iris_input() -> Record {
    Record::new()
        .with("sepal_length", 6.0)
        .with("sepal_width", 3.0)
        .with("petal_length", 4.0)
        .with("petal_width", 1.0)
}
