//! Error types for chain assembly
//!
//! Provides error handling for:
//! - Reference resolution (decorators and base models)
//! - Decorator construction inside a chain
//! - Service configuration loading

use mld_model::DecoratorError;
use std::fmt;
use std::path::PathBuf;

/// Which registry a reference was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Decorator registry
    Decorator,
    /// Model registry
    Model,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decorator => f.write_str("decorator"),
            Self::Model => f.write_str("model"),
        }
    }
}

/// Errors raised while assembling chains
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// No registry entry for a reference name
    #[error("unresolvable {kind} reference: '{reference}'")]
    UnresolvableReference {
        /// Registry consulted
        kind: ReferenceKind,
        /// Name that was looked up
        reference: String,
    },

    /// A decorator rejected its wrapped component or configuration
    #[error("construction of layer {index} ('{reference}') failed: {source}")]
    ConstructionFailure {
        /// Position in the chain spec (0 = innermost)
        index: usize,
        /// Decorator reference
        reference: String,
        /// Underlying decorator error
        #[source]
        source: DecoratorError,
    },

    /// Two models configured under the same qualified name
    #[error("duplicate model: '{0}'")]
    DuplicateModel(String),

    /// Configured qualified name differs from what the built chain exposes
    #[error("model configured as '{configured}' exposes qualified name '{actual}'")]
    QualifiedNameMismatch {
        /// Name in the configuration
        configured: String,
        /// Name reported by the chain
        actual: String,
    },

    /// Configuration file could not be read
    #[error("io error reading {path}: {source}")]
    ConfigIo {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text could not be parsed
    #[error("invalid {format} configuration: {message}")]
    ConfigParse {
        /// Format name
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// File extension not recognized
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl ChainError {
    /// Create unresolvable decorator reference error
    #[must_use]
    pub fn unknown_decorator(reference: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            kind: ReferenceKind::Decorator,
            reference: reference.into(),
        }
    }

    /// Create unresolvable model reference error
    #[must_use]
    pub fn unknown_model(reference: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            kind: ReferenceKind::Model,
            reference: reference.into(),
        }
    }

    /// Create parse error
    #[must_use]
    pub fn parse(format: &'static str, message: impl fmt::Display) -> Self {
        Self::ConfigParse {
            format,
            message: message.to_string(),
        }
    }
}

/// Result type alias for chain operations
pub type ChainResult<T> = Result<T, ChainError>;
