//! MLD Chain Assembly
//!
//! Turns a declarative service configuration into ready-to-serve decorator
//! chains. References in the configuration are looked up in in-process
//! registries; nothing is loaded by path.
//!
//! # Core Concepts
//!
//! - [`DecoratorRegistry`] / [`ModelRegistry`]: Name → constructor tables
//! - [`ServiceConfig`]: Served models and their ordered decorator specs
//! - [`build_chain`]: Left-to-right fold, first spec innermost
//! - [`ChainAssembler`]: Builds and validates every configured model
//!
//! # Example
//!
//! ```rust,ignore
//! use mld_chain::{ChainAssembler, ModelRegistry, ServiceConfig};
//!
//! let mut models = ModelRegistry::new();
//! models.register_default::<IrisModel>("iris_model");
//!
//! let config = ServiceConfig::from_path("service.yaml")?;
//! let service = ChainAssembler::with_models(models).assemble(&config)?;
//! let iris = service.get("iris_model").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builder;
pub mod error;
pub mod registry;
pub mod spec;

// Re-exports for convenience
pub use builder::{build_chain, AssembledService, ChainAssembler};
pub use error::{ChainError, ChainResult, ReferenceKind};
pub use registry::{DecoratorConstructor, DecoratorRegistry, ModelFactory, ModelRegistry};
pub use spec::{ConfigFormat, DecoratorSpec, ModelSpec, ServiceConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for assembling chains
    pub use crate::{
        build_chain, AssembledService, ChainAssembler, ChainError, ChainResult,
        DecoratorRegistry, DecoratorSpec, ModelRegistry, ModelSpec, ServiceConfig,
    };
}
