//! MLD Model Layer
//!
//! Capability surface for prediction-serving models and the decorator
//! mechanism that attaches cross-cutting behavior to them at deployment time.
//!
//! # Core Concepts
//!
//! - [`Model`]: Identity, input/output contracts and `predict`
//! - [`Decorator`]: A [`Model`] owning one wrapped [`Model`], forwarding by default
//! - [`Decoration`]: The overridable part of a decorator
//! - [`decorations`]: Built-in decorations ([`PredictionId`], [`LifecycleLogging`], [`Alias`])
//!
//! # Example
//!
//! ```rust,ignore
//! use mld_model::{Decorator, Model, PredictionId};
//! use mld_contract::Record;
//!
//! let model: Box<dyn Model> = Box::new(IrisModel::new());
//! let tagged = Decorator::<PredictionId>::new(model)?;
//!
//! let out = tagged.predict(&Record::new().with("sepal_length", 6.0))?;
//! assert!(out.get_str("identifier").is_some());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod decorations;
pub mod decorator;
pub mod error;
pub mod surface;

// Re-exports for convenience
pub use config::DecoratorConfig;
pub use decorations::{Alias, LifecycleLogging, PredictionId};
pub use decorator::{Decoration, Decorator, DecoratorBuilder, Layer, Transparent};
pub use error::{DecoratorError, ModelError, PredictResult};
pub use surface::{check_surface, Model};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with models and decorators
    pub use crate::{
        Decoration, Decorator, DecoratorConfig, DecoratorError, Layer, Model, ModelError,
        PredictResult,
    };
    pub use mld_contract::{Contract, FieldDescriptor, FieldType, Record};
}
