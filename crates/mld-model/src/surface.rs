//! Capability surface
//!
//! Everything a prediction-serving component exposes: identity, the two
//! contracts and `predict`. Decorators implement the same trait, so a chain
//! of any depth is consumed exactly like a bare model.

use crate::error::{DecoratorError, PredictResult};
use mld_contract::{Contract, Record};
use std::fmt;
use std::sync::Arc;

/// Prediction-serving component
///
/// # Concurrency
/// Implementations are shared across request handlers; `predict` must not
/// rely on unsynchronized mutable state.
pub trait Model: Send + Sync + fmt::Debug {
    /// Human-readable name
    fn display_name(&self) -> String;

    /// Stable identifier used for routing
    fn qualified_name(&self) -> String;

    /// Long description
    fn description(&self) -> String;

    /// Model version
    fn version(&self) -> String;

    /// Contract of accepted inputs
    fn input_contract(&self) -> Arc<Contract>;

    /// Contract of produced outputs
    fn output_contract(&self) -> Arc<Contract>;

    /// Map an input instance to an output instance
    ///
    /// # Errors
    /// Implementation-defined; decorators propagate them unchanged.
    fn predict(&self, input: &Record) -> PredictResult<Record>;
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn qualified_name(&self) -> String {
        (**self).qualified_name()
    }

    fn description(&self) -> String {
        (**self).description()
    }

    fn version(&self) -> String {
        (**self).version()
    }

    fn input_contract(&self) -> Arc<Contract> {
        (**self).input_contract()
    }

    fn output_contract(&self) -> Arc<Contract> {
        (**self).output_contract()
    }

    fn predict(&self, input: &Record) -> PredictResult<Record> {
        (**self).predict(input)
    }
}

/// Conformance check applied to every component before it is wrapped
///
/// The trait guarantees every member exists; this rejects members that are
/// present but unusable.
///
/// # Errors
/// `DecoratorError::InvalidWrappedComponent` naming the first failing member
pub fn check_surface(model: &dyn Model) -> Result<(), DecoratorError> {
    let qualified_name = model.qualified_name();
    if qualified_name.is_empty() {
        return Err(DecoratorError::invalid_wrapped("qualified name is empty"));
    }
    if qualified_name.chars().any(char::is_whitespace) {
        return Err(DecoratorError::invalid_wrapped(format!(
            "qualified name '{qualified_name}' contains whitespace"
        )));
    }
    if model.display_name().is_empty() {
        return Err(DecoratorError::invalid_wrapped(format!(
            "'{qualified_name}' has an empty display name"
        )));
    }
    if model.version().is_empty() {
        return Err(DecoratorError::invalid_wrapped(format!(
            "'{qualified_name}' has an empty version"
        )));
    }
    if model.input_contract().name().is_empty() {
        return Err(DecoratorError::invalid_wrapped(format!(
            "'{qualified_name}' has an unnamed input contract"
        )));
    }
    if model.output_contract().name().is_empty() {
        return Err(DecoratorError::invalid_wrapped(format!(
            "'{qualified_name}' has an unnamed output contract"
        )));
    }
    Ok(())
}
