//! MLD Contract System
//!
//! Immutable input/output schemas for prediction-serving models.
//!
//! # Core Concepts
//!
//! - [`Contract`]: Ordered, immutable mapping of field name → [`FieldDescriptor`]
//! - [`ContractExtension`]: Non-mutating derivation of a contract with extra fields
//! - [`Record`]: A runtime instance of a contract, exchanged through `predict`
//!
//! # Example
//!
//! ```rust
//! use mld_contract::{Contract, FieldDescriptor, FieldType, Record};
//!
//! let output = Contract::new("ModelOutput")
//!     .field("b", FieldDescriptor::required(FieldType::Integer));
//!
//! // Widen without touching the original
//! let tagged = output.extend([("identifier", FieldDescriptor::required(FieldType::String))]);
//! assert_eq!(tagged.name(), "ModelOutput");
//! assert!(!output.contains("identifier"));
//!
//! let instance = tagged
//!     .instantiate(Record::new().with("b", 10).with("identifier", "X"))
//!     .unwrap();
//! assert_eq!(instance.get_str("identifier"), Some("X"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod contract;
mod error;
mod extension;
mod field;
mod record;

// Re-exports
pub use contract::{Contract, JSON_SCHEMA_DRAFT};
pub use error::{ContractError, ContractResult};
pub use extension::{ContractExtension, OverridePolicy};
pub use field::{json_type_name, FieldDescriptor, FieldType};
pub use record::Record;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
