//! Field descriptors
//!
//! A [`FieldDescriptor`] describes one named slot of a contract: its declared
//! [`FieldType`], whether it is required, an optional default and two opaque
//! maps (constraints, metadata) that are carried through derivation untouched.

use indexmap::IndexMap;
use schemars::schema::{ArrayValidation, InstanceType, Metadata, Schema, SchemaObject, SingleOrVec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared type of a contract field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Signed or unsigned integer
    Integer,
    /// Any JSON number
    Number,
    /// Boolean
    Boolean,
    /// String restricted to the listed variants
    Enum(Vec<String>),
    /// Homogeneous array
    Array(Box<FieldType>),
    /// Arbitrary JSON object
    Object,
    /// Anything at all
    Any,
}

impl FieldType {
    /// Check whether a (non-null) JSON value inhabits this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Number, Value::Number(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Enum(variants), Value::String(s)) => variants.iter().any(|v| v == s),
            (Self::Array(item), Value::Array(values)) => values.iter().all(|v| item.accepts(v)),
            (Self::Object, Value::Object(_)) => true,
            _ => false,
        }
    }

    /// JSON Schema fragment for this type
    #[must_use]
    pub fn json_schema(&self) -> SchemaObject {
        let typed = |ty: InstanceType| SchemaObject {
            instance_type: Some(SingleOrVec::Single(Box::new(ty))),
            ..SchemaObject::default()
        };
        match self {
            Self::String => typed(InstanceType::String),
            Self::Integer => typed(InstanceType::Integer),
            Self::Number => typed(InstanceType::Number),
            Self::Boolean => typed(InstanceType::Boolean),
            Self::Enum(variants) => SchemaObject {
                enum_values: Some(variants.iter().cloned().map(Value::String).collect()),
                ..typed(InstanceType::String)
            },
            Self::Array(item) => SchemaObject {
                array: Some(Box::new(ArrayValidation {
                    items: Some(SingleOrVec::Single(Box::new(Schema::Object(item.json_schema())))),
                    ..ArrayValidation::default()
                })),
                ..typed(InstanceType::Array)
            },
            Self::Object => typed(InstanceType::Object),
            Self::Any => SchemaObject::default(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Enum(variants) => write!(f, "enum[{}]", variants.join("|")),
            Self::Array(item) => write!(f, "array<{item}>"),
            Self::Object => f.write_str("object"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Name of the JSON type of a value, for diagnostics
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Descriptor for a single contract field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Declared type
    #[serde(rename = "type")]
    pub ty: FieldType,

    /// Whether instances must carry a non-null value
    pub required: bool,

    /// Value used when an optional field is absent; `None` means absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Opaque validation constraints (`gt`, `max_length`, ...)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub constraints: IndexMap<String, Value>,

    /// Opaque descriptive metadata
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl FieldDescriptor {
    /// Required field of the given type
    #[inline]
    #[must_use]
    pub fn required(ty: FieldType) -> Self {
        Self {
            ty,
            required: true,
            default: None,
            constraints: IndexMap::new(),
            metadata: IndexMap::new(),
        }
    }

    /// Optional field with an absent default
    #[inline]
    #[must_use]
    pub fn optional(ty: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(ty)
        }
    }

    /// Set default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Add an opaque constraint
    #[inline]
    #[must_use]
    pub fn with_constraint(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }

    /// Add a metadata entry
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// Value an instance takes when the field is not supplied
    #[inline]
    #[must_use]
    pub fn absent_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    /// JSON Schema property for this field
    ///
    /// Constraints are carried verbatim as extension keywords.
    #[must_use]
    pub fn json_schema(&self) -> SchemaObject {
        let mut schema = self.ty.json_schema();
        schema.extensions.extend(
            self.constraints
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        let description = self
            .metadata
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        if self.default.is_some() || description.is_some() {
            schema.metadata = Some(Box::new(Metadata {
                description,
                default: self.default.clone(),
                ..Metadata::default()
            }));
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(schema: SchemaObject) -> Value {
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn integer_rejects_float() {
        assert!(FieldType::Integer.accepts(&json!(5)));
        assert!(!FieldType::Integer.accepts(&json!(5.5)));
        assert!(FieldType::Number.accepts(&json!(5.5)));
    }

    #[test]
    fn enum_accepts_only_variants() {
        let ty = FieldType::Enum(vec!["Iris setosa".into(), "Iris virginica".into()]);
        assert!(ty.accepts(&json!("Iris setosa")));
        assert!(!ty.accepts(&json!("Iris unknown")));
        assert!(!ty.accepts(&json!(1)));
    }

    #[test]
    fn array_checks_items() {
        let ty = FieldType::Array(Box::new(FieldType::Integer));
        assert!(ty.accepts(&json!([1, 2, 3])));
        assert!(!ty.accepts(&json!([1, "two"])));
    }

    #[test]
    fn optional_has_absent_default() {
        let field = FieldDescriptor::optional(FieldType::String);
        assert!(!field.required);
        assert_eq!(field.absent_value(), Value::Null);
    }

    #[test]
    fn schema_carries_constraints_and_default() {
        let field = FieldDescriptor::optional(FieldType::Number)
            .with_constraint("exclusiveMinimum", 5.0)
            .with_default(6.0);
        let schema = rendered(field.json_schema());
        assert_eq!(schema["type"], "number");
        assert_eq!(schema["exclusiveMinimum"], 5.0);
        assert_eq!(schema["default"], 6.0);
    }

    #[test]
    fn schema_for_nested_types() {
        let species = FieldType::Enum(vec!["Iris setosa".into(), "Iris virginica".into()]);
        let schema = rendered(FieldType::Array(Box::new(species)).json_schema());
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
        assert_eq!(schema["items"]["enum"], json!(["Iris setosa", "Iris virginica"]));
        assert_eq!(rendered(FieldType::Any.json_schema()), json!({}));
    }

    #[test]
    fn schema_description_from_metadata() {
        let field = FieldDescriptor::required(FieldType::String)
            .with_metadata("description", "Unique identifier.")
            .with_metadata("owner", "serving");
        let schema = rendered(field.json_schema());
        assert_eq!(schema["description"], "Unique identifier.");
        assert!(schema.get("owner").is_none());
        assert!(schema.get("default").is_none());
    }

    #[test]
    fn display_names() {
        assert_eq!(FieldType::Array(Box::new(FieldType::String)).to_string(), "array<string>");
        assert_eq!(json_type_name(&json!(1.5)), "number");
    }
}
