//! Error types for contract derivation and instantiation

/// Errors raised while deriving or instantiating a contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// An extension tried to redefine an inherited field under the
    /// reject-overrides policy
    #[error("schema conflict in contract '{contract}': field '{field}' already defined")]
    SchemaConflict {
        /// Name of the contract being extended
        contract: String,
        /// Colliding field name
        field: String,
    },

    /// A required field was absent (or `null`) in the supplied values
    #[error("contract '{contract}' requires field '{field}'")]
    MissingField {
        /// Contract being instantiated
        contract: String,
        /// Missing field name
        field: String,
    },

    /// A value did not match the declared field type
    #[error("field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        /// Offending field name
        field: String,
        /// Declared type
        expected: String,
        /// JSON type of the supplied value
        actual: String,
    },
}

impl ContractError {
    /// Create schema conflict error
    #[must_use]
    pub fn schema_conflict(contract: impl Into<String>, field: impl Into<String>) -> Self {
        Self::SchemaConflict {
            contract: contract.into(),
            field: field.into(),
        }
    }

    /// Create missing field error
    #[must_use]
    pub fn missing_field(contract: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            contract: contract.into(),
            field: field.into(),
        }
    }
}

/// Result type alias for contract operations
pub type ContractResult<T> = Result<T, ContractError>;
