//! Contract type
//!
//! A [`Contract`] is the published schema of a model's input or output. It is
//! built once, shared behind an `Arc` and never mutated afterwards; widening a
//! contract goes through [`Contract::extend`] or
//! [`ContractExtension`](crate::ContractExtension), which produce new values.

use crate::error::{ContractError, ContractResult};
use crate::field::{json_type_name, FieldDescriptor};
use crate::record::Record;
use indexmap::IndexMap;
use schemars::schema::{
    InstanceType, Metadata, ObjectValidation, RootSchema, Schema, SchemaObject, SingleOrVec,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Meta-schema URI stamped on rendered documents
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Ordered, immutable field schema
///
/// Equality is structural over the field mapping only: two contracts with
/// different names but identical fields compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    fields: IndexMap<String, FieldDescriptor>,
}

impl Contract {
    /// Create empty contract
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field declaration
    ///
    /// Redeclaring a field replaces it in place.
    #[inline]
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Contract name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human description, if any
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Look up a field descriptor
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    /// Check if field is declared
    #[inline]
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Names of required fields
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, d)| d.required)
            .map(|(k, _)| k.as_str())
    }

    /// Number of declared fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if contract declares no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn from_parts(
        name: String,
        description: Option<String>,
        fields: IndexMap<String, FieldDescriptor>,
    ) -> Self {
        Self {
            name,
            description,
            fields,
        }
    }

    pub(crate) fn field_map(&self) -> &IndexMap<String, FieldDescriptor> {
        &self.fields
    }

    /// Build an instance of this contract from loose values
    ///
    /// Fields are emitted in contract order. Missing optional fields take
    /// their default (`null` when absent); undeclared fields are dropped.
    ///
    /// # Errors
    /// - `ContractError::MissingField` if a required field is absent or `null`
    /// - `ContractError::TypeMismatch` if a value has the wrong JSON type
    pub fn instantiate(&self, mut values: Record) -> ContractResult<Record> {
        let mut out = Record::new();
        for (name, descriptor) in &self.fields {
            let value = match values.remove(name) {
                Some(Value::Null) | None if descriptor.required => {
                    return Err(ContractError::missing_field(&self.name, name));
                }
                Some(Value::Null) | None => descriptor.absent_value(),
                Some(value) => {
                    if !descriptor.ty.accepts(&value) {
                        return Err(ContractError::TypeMismatch {
                            field: name.clone(),
                            expected: descriptor.ty.to_string(),
                            actual: json_type_name(&value).to_string(),
                        });
                    }
                    value
                }
            };
            out.insert(name.clone(), value);
        }
        Ok(out)
    }

    /// Render as a JSON Schema document
    #[must_use]
    pub fn json_schema(&self) -> RootSchema {
        let object = ObjectValidation {
            properties: self
                .fields
                .iter()
                .map(|(name, d)| (name.clone(), Schema::Object(d.json_schema())))
                .collect(),
            required: self.required_fields().map(ToString::to_string).collect(),
            ..ObjectValidation::default()
        };

        RootSchema {
            meta_schema: Some(JSON_SCHEMA_DRAFT.to_string()),
            schema: SchemaObject {
                metadata: Some(Box::new(Metadata {
                    title: Some(self.name.clone()),
                    description: self.description.clone(),
                    ..Metadata::default()
                })),
                instance_type: Some(SingleOrVec::Single(Box::new(InstanceType::Object))),
                object: Some(Box::new(object)),
                ..SchemaObject::default()
            },
            ..RootSchema::default()
        }
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a == b)
    }
}
