//! Built-in decorations
//!
//! - [`PredictionId`]: identifier injection (contracts + predict)
//! - [`LifecycleLogging`]: before/after prediction events (predict only)
//! - [`Alias`]: qualified/display name override (identity only)

mod alias;
mod lifecycle;
mod prediction_id;

pub use alias::Alias;
pub use lifecycle::LifecycleLogging;
pub use prediction_id::{PredictionId, DEFAULT_FIELD};
