//! Error types for models and decorators
//!
//! Provides error handling for:
//! - Decorator construction (wrapped surface, binding, configuration)
//! - Prediction failures, which decorators propagate unchanged

use mld_contract::ContractError;

/// Errors raised while constructing a decorator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecoratorError {
    /// The wrapped component does not satisfy the capability surface
    #[error("invalid wrapped component: {reason}")]
    InvalidWrappedComponent {
        /// What the conformance check found
        reason: String,
    },

    /// Decorator was built before a wrapped component was attached
    #[error("decorator has no wrapped component")]
    UnboundDecorator,

    /// The decorator rejected its own configuration
    #[error("invalid configuration key '{key}': {reason}")]
    InvalidConfiguration {
        /// Offending configuration key
        key: String,
        /// Why it was rejected
        reason: String,
    },
}

impl DecoratorError {
    /// Create invalid wrapped component error
    #[must_use]
    pub fn invalid_wrapped(reason: impl Into<String>) -> Self {
        Self::InvalidWrappedComponent {
            reason: reason.into(),
        }
    }

    /// Create invalid configuration error
    #[must_use]
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by `predict`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The model's own prediction logic failed
    #[error("model '{model}' failed: {message}")]
    Prediction {
        /// Qualified name of the failing model
        model: String,
        /// Failure description
        message: String,
    },

    /// Input could not be interpreted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record did not satisfy a contract
    #[error("contract violation: {0}")]
    Contract(#[from] ContractError),
}

impl ModelError {
    /// Create prediction error
    #[must_use]
    pub fn prediction(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Prediction {
            model: model.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for predictions
pub type PredictResult<T> = Result<T, ModelError>;
