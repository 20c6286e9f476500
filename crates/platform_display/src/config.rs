//! Configuration system
//!
//! Display bootstrap settings, loadable from TOML or RON files.
//!
//! ```toml
//! backend = "wpe"
//! native_identifier = 7
//! fallback_to_headless = true
//! headless_identifier = 0
//! log_level = "debug"
//! ```

use crate::kind::{BackendKind, ParseBackendKindError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse, or has an extension
    /// other than `.toml` or `.ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::of(path)?;
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match format {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Fails on serialization or write errors and on unsupported extensions.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::of(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but cannot be used
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Which backend to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BackendPreference {
    /// Detect from the environment
    #[default]
    Auto,
    /// Always use this backend
    Kind(BackendKind),
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Kind(kind) => f.write_str(kind.name()),
        }
    }
}

impl FromStr for BackendPreference {
    type Err = ParseBackendKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Kind)
        }
    }
}

impl TryFrom<String> for BackendPreference {
    type Error = ParseBackendKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackendPreference> for String {
    fn from(value: BackendPreference) -> Self {
        value.to_string()
    }
}

/// # Display Configuration
///
/// How the bootstrap code picks and initializes the platform display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Backend to create
    pub backend: BackendPreference,
    /// Identifier handed to `initialize`; 0 when unset
    pub native_identifier: Option<i32>,
    /// Create a headless display when the selected backend fails
    pub fallback_to_headless: bool,
    /// Render node descriptor used for the headless fallback
    pub headless_identifier: i32,
    /// `env_logger` filter
    pub log_level: String,
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            backend: BackendPreference::Auto,
            native_identifier: None,
            fallback_to_headless: true,
            headless_identifier: 0,
            log_level: "info".to_string(),
        }
    }

    /// Force a backend
    #[must_use]
    pub fn with_backend(mut self, kind: BackendKind) -> Self {
        self.backend = BackendPreference::Kind(kind);
        self
    }

    /// Set the identifier passed to `initialize`
    #[must_use]
    pub fn with_native_identifier(mut self, identifier: i32) -> Self {
        self.native_identifier = Some(identifier);
        self
    }

    /// Enable or disable the headless fallback
    #[must_use]
    pub fn with_headless_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_headless = enabled;
        self
    }

    /// Set the render node descriptor for the headless fallback
    #[must_use]
    pub fn with_headless_identifier(mut self, identifier: i32) -> Self {
        self.headless_identifier = identifier;
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Identifier for the selected backend
    pub fn identifier(&self) -> i32 {
        self.native_identifier.unwrap_or(0)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Rejects a negative headless identifier and an empty log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.headless_identifier < 0 {
            return Err(ConfigError::Invalid(format!(
                "headless identifier must not be negative, got {}",
                self.headless_identifier
            )));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for DisplayConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.backend, BackendPreference::Auto);
        assert_eq!(config.identifier(), 0);
        assert!(config.fallback_to_headless);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "backend = \"wpe\"\nnative_identifier = 7\n").unwrap();

        let config = DisplayConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.backend, BackendPreference::Kind(BackendKind::Wpe));
        assert_eq!(config.identifier(), 7);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_ron_save_and_load() {
        let file = Builder::new().suffix(".ron").tempfile().unwrap();
        let config = DisplayConfig::new()
            .with_backend(BackendKind::Wayland)
            .with_headless_fallback(false)
            .with_log_level("debug");

        config.save_to_file(file.path()).unwrap();
        let loaded = DisplayConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "backend = \"directfb\"").unwrap();

        let err = DisplayConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let err = DisplayConfig::default().save_to_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_with_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayConfig::load_from_file(dir.path().join("display.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)), "{err}");

        let err = DisplayConfig::load_from_file(dir.path().join("display.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "{err}");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = DisplayConfig::new().with_headless_identifier(-2);
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let silent = DisplayConfig::new().with_log_level("  ");
        assert!(matches!(silent.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_preference_strings() {
        assert_eq!("AUTO".parse::<BackendPreference>(), Ok(BackendPreference::Auto));
        assert_eq!(
            "x11".parse::<BackendPreference>(),
            Ok(BackendPreference::Kind(BackendKind::X11))
        );
        assert_eq!(String::from(BackendPreference::Kind(BackendKind::Wpe)), "wpe");
    }
}
