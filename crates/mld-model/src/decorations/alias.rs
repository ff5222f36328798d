//! Identity override
//!
//! Publishes the wrapped model under another qualified name (and optionally
//! display name). Everything else is forwarded.

use crate::config::DecoratorConfig;
use crate::decorator::{Decoration, Layer};
use crate::error::DecoratorError;

/// Renames the wrapped model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    qualified_name: String,
    display_name: Option<String>,
}

impl Alias {
    /// Alias under `qualified_name`
    ///
    /// # Errors
    /// `DecoratorError::InvalidConfiguration` if the name contains whitespace
    pub fn new(qualified_name: impl Into<String>) -> Result<Self, DecoratorError> {
        let qualified_name = qualified_name.into();
        if qualified_name.is_empty() || qualified_name.chars().any(char::is_whitespace) {
            return Err(DecoratorError::invalid_config(
                "qualified_name",
                format!("'{qualified_name}' is not a valid qualified name"),
            ));
        }
        Ok(Self {
            qualified_name,
            display_name: None,
        })
    }

    /// Also override the display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl Decoration for Alias {
    fn from_config(config: &DecoratorConfig) -> Result<Self, DecoratorError> {
        let alias = Self::new(config.require_str("qualified_name")?)?;
        Ok(match config.optional_str("display_name")? {
            Some(display_name) => alias.with_display_name(display_name),
            None => alias,
        })
    }

    fn display_name(&self, layer: Layer<'_>) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| layer.wrapped().display_name())
    }

    fn qualified_name(&self, _layer: Layer<'_>) -> String {
        self.qualified_name.clone()
    }
}
