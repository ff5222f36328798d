//! Base models shipped with the demo host

use mld_chain::ModelRegistry;
use mld_contract::{Contract, FieldDescriptor, FieldType, Record};
use mld_model::{Model, ModelError, PredictResult};
use std::sync::Arc;

const SPECIES: [&str; 3] = ["Iris setosa", "Iris versicolor", "Iris virginica"];

const FEATURES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Per-species feature means, in `FEATURES` order
const CENTROIDS: [[f64; 4]; 3] = [
    [5.006, 3.428, 1.462, 0.246],
    [5.936, 2.770, 4.260, 1.326],
    [6.588, 2.974, 5.552, 2.026],
];

/// Nearest-centroid iris classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct IrisClassifier;

impl Model for IrisClassifier {
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
        let bounds = [(5.0, 8.0), (2.0, 6.0), (1.0, 6.8), (0.0, 3.0)];
        let contract = FEATURES.iter().zip(bounds).fold(
            Contract::new("ModelInput").with_description("Measurements of one iris flower."),
            |contract, (name, (gt, lt))| {
                contract.field(
                    *name,
                    FieldDescriptor::required(FieldType::Number)
                        .with_constraint("exclusiveMinimum", gt)
                        .with_constraint("exclusiveMaximum", lt)
                        .with_metadata("description", format!("{} in centimeters.", name.replace('_', " "))),
                )
            },
        );
        Arc::new(contract)
    }

    fn output_contract(&self) -> Arc<Contract> {
        let species = SPECIES.iter().map(ToString::to_string).collect();
        Arc::new(
            Contract::new("ModelOutput").field(
                "species",
                FieldDescriptor::required(FieldType::Enum(species))
                    .with_metadata("description", "Predicted species of the flower."),
            ),
        )
    }

    fn predict(&self, input: &Record) -> PredictResult<Record> {
        let input = self.input_contract().instantiate(input.clone())?;

        let mut features = [0.0; 4];
        for (slot, name) in features.iter_mut().zip(FEATURES) {
            *slot = input
                .get_f64(name)
                .ok_or_else(|| ModelError::InvalidInput(format!("field '{name}' must be a number")))?;
        }

        let distance = |centroid: &[f64; 4]| -> f64 {
            centroid
                .iter()
                .zip(features)
                .map(|(c, x)| (c - x).powi(2))
                .sum()
        };

        let species = CENTROIDS
            .iter()
            .zip(SPECIES)
            .min_by(|(a, _), (b, _)| distance(a).total_cmp(&distance(b)))
            .map_or(SPECIES[0], |(_, species)| species);

        Ok(Record::new().with("species", species))
    }
}

/// `{a: integer}` → `{b: integer}` with `b = 2a`
#[derive(Debug, Clone, Copy, Default)]
pub struct Doubling;

impl Model for Doubling {
    fn display_name(&self) -> String {
        "Doubling Model".to_string()
    }

    fn qualified_name(&self) -> String {
        "doubling_model".to_string()
    }

    fn description(&self) -> String {
        "Doubles an integer.".to_string()
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

/// Registry of every base model the demo host can serve
#[must_use]
pub fn registry() -> ModelRegistry {
    let mut models = ModelRegistry::new();
    models.register_default::<IrisClassifier>("iris_model");
    models.register_default::<Doubling>("doubling_model");
    models
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flower(values: [f64; 4]) -> Record {
        FEATURES.iter().zip(values).map(|(k, v)| (*k, v)).collect()
    }

    #[test]
    fn classifies_each_centroid() {
        for (centroid, species) in CENTROIDS.iter().zip(SPECIES) {
            let out = IrisClassifier.predict(&flower(*centroid)).unwrap();
            assert_eq!(out.get_str("species"), Some(species));
        }
    }

    #[test]
    fn missing_measurement_is_contract_error() {
        let input = Record::new().with("sepal_length", 6.0);
        let err = IrisClassifier.predict(&input).unwrap_err();
        assert!(matches!(err, ModelError::Contract(_)));
    }

    #[test]
    fn doubling_overflow_reported() {
        let err = Doubling.predict(&Record::new().with("a", i64::MAX)).unwrap_err();
        assert!(matches!(err, ModelError::Prediction { .. }));
        assert_eq!(Doubling.predict(&Record::new().with("a", 5)).unwrap().get_i64("b"), Some(10));
    }

    #[test]
    fn registry_names() {
        assert_eq!(registry().names(), vec!["iris_model", "doubling_model"]);
    }
}
