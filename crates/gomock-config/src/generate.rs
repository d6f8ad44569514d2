//! Mock generation settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_true() -> bool {
    true
}

fn default_callback_prefix() -> String {
    "Callback".to_string()
}

fn default_mock_suffix() -> String {
    "Mock".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateConfig {
    /// Prefix local type names with the source package name.
    #[serde(default)]
    pub qualify: bool,

    /// Emit the `<Mock>Interface` wrapper and its `Mock()` accessor.
    #[serde(default = "default_true")]
    pub wrapper: bool,

    /// Emit the `New<Mock>()` constructor.
    #[serde(default = "default_true")]
    pub constructor: bool,

    /// Emit a generated-code notice and a `package` clause.
    #[serde(default)]
    pub header: bool,

    /// Prefix of callback field names (`CallbackGet`).
    #[serde(default = "default_callback_prefix")]
    pub callback_prefix: String,

    /// Suffix of the mock struct name (`StoreMock`).
    #[serde(default = "default_mock_suffix")]
    pub mock_suffix: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            qualify: false,
            wrapper: true,
            constructor: true,
            header: false,
            callback_prefix: default_callback_prefix(),
            mock_suffix: default_mock_suffix(),
        }
    }
}

impl GenerateConfig {
    /// Check that the naming fragments produce valid, exported Go identifiers.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.callback_prefix.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(invalid(
                "generate.callback_prefix",
                "must start with an uppercase ASCII letter so callbacks are exported",
            ));
        }
        if !is_identifier_fragment(&self.callback_prefix) {
            return Err(invalid(
                "generate.callback_prefix",
                "may only contain ASCII letters, digits and underscores",
            ));
        }
        if self.mock_suffix.is_empty() {
            return Err(invalid(
                "generate.mock_suffix",
                "must not be empty; the mock would take the interface's name",
            ));
        }
        if !is_identifier_fragment(&self.mock_suffix) {
            return Err(invalid(
                "generate.mock_suffix",
                "may only contain ASCII letters, digits and underscores",
            ));
        }
        Ok(())
    }
}

fn is_identifier_fragment(value: &str) -> bool {
    value.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
