//! Declarative chain specification
//!
//! The service configuration lists every served model together with the
//! ordered decorators to wrap it in. The first decorator listed is the
//! innermost; the last one sees client calls first.
//!
//! ```yaml
//! service_title: Iris Service
//! models:
//!   - qualified_name: iris_model
//!     reference: iris_model
//!     decorators:
//!       - reference: prediction_id
//!       - reference: lifecycle_logging
//!         configuration:
//!           label: edge
//! ```

use crate::error::{ChainError, ChainResult};
use mld_model::DecoratorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One decorator layer: registry reference plus verbatim configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoratorSpec {
    /// Decorator registry name
    pub reference: String,

    /// Passed unchanged to the decorator constructor
    #[serde(default, skip_serializing_if = "DecoratorConfig::is_empty")]
    pub configuration: DecoratorConfig,
}

impl DecoratorSpec {
    /// Spec with empty configuration
    #[inline]
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            configuration: DecoratorConfig::new(),
        }
    }

    /// Set configuration
    #[inline]
    #[must_use]
    pub fn with_configuration(mut self, configuration: DecoratorConfig) -> Self {
        self.configuration = configuration;
        self
    }
}

/// A served model: base reference plus its decorator chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpec {
    /// Name the built chain must expose
    pub qualified_name: String,

    /// Model registry name
    pub reference: String,

    /// Decorators, innermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<DecoratorSpec>,
}

impl ModelSpec {
    /// Spec without decorators
    #[inline]
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            reference: reference.into(),
            decorators: Vec::new(),
        }
    }

    /// Append a decorator (becomes the new outermost layer)
    #[inline]
    #[must_use]
    pub fn decorated_with(mut self, decorator: DecoratorSpec) -> Self {
        self.decorators.push(decorator);
        self
    }
}

/// Whole-service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Title shown by the hosting transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_title: Option<String>,

    /// Served models
    #[serde(default)]
    pub models: Vec<ModelSpec>,
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
    /// TOML (`.toml`)
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl ServiceConfig {
    /// Parse YAML text
    ///
    /// # Errors
    /// `ChainError::ConfigParse` on malformed input
    pub fn from_yaml_str(text: &str) -> ChainResult<Self> {
        serde_yaml::from_str(text).map_err(|e| ChainError::parse("yaml", e))
    }

    /// Parse JSON text
    ///
    /// # Errors
    /// `ChainError::ConfigParse` on malformed input
    pub fn from_json_str(text: &str) -> ChainResult<Self> {
        serde_json::from_str(text).map_err(|e| ChainError::parse("json", e))
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// `ChainError::ConfigParse` on malformed input
    pub fn from_toml_str(text: &str) -> ChainResult<Self> {
        toml::from_str(text).map_err(|e| ChainError::parse("toml", e))
    }

    /// Parse text in the given format
    ///
    /// # Errors
    /// `ChainError::ConfigParse` on malformed input
    pub fn parse(text: &str, format: ConfigFormat) -> ChainResult<Self> {
        match format {
            ConfigFormat::Yaml => Self::from_yaml_str(text),
            ConfigFormat::Json => Self::from_json_str(text),
            ConfigFormat::Toml => Self::from_toml_str(text),
        }
    }

    /// Load from a file, choosing the format by extension
    ///
    /// # Errors
    /// - `ChainError::UnsupportedFormat` for unknown extensions
    /// - `ChainError::ConfigIo` if the file cannot be read
    /// - `ChainError::ConfigParse` on malformed input
    pub fn from_path(path: impl AsRef<Path>) -> ChainResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ChainError::UnsupportedFormat(path.to_path_buf()))?;

        let text = std::fs::read_to_string(path).map_err(|source| ChainError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), format = format.name(), "loading service configuration");
        Self::parse(&text, format)
    }

    /// Find a model by qualified name
    #[must_use]
    pub fn model(&self, qualified_name: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.qualified_name == qualified_name)
    }
}
