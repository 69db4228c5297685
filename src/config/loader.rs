use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("No API key configured. Set GEMINI_API_KEY (or API_KEY), pass --api-key, or add api_key under [gemini] in {}", .path.display())]
    MissingApiKey { path: PathBuf },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/genealogy-assistant/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("genealogy-assistant").join("config.toml")
    }

    /// Default log file location.
    pub fn default_log_path() -> PathBuf {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("genealogy-assistant").join("assistant.log")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Base URL and model are non-empty
    /// - Timeouts and UI intervals are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gemini = &self.gemini;
        if gemini.base_url.trim().is_empty() {
            return Err(validation("gemini.base_url must not be empty"));
        }
        if gemini.model.trim().is_empty() {
            return Err(validation("gemini.model must not be empty"));
        }
        if gemini.connect_timeout_seconds == 0
            || gemini.request_timeout_seconds == 0
            || gemini.idle_timeout_seconds == 0
        {
            return Err(validation("gemini timeouts must be greater than zero"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(validation("ui.tick_rate_ms must be greater than zero"));
        }
        Ok(())
    }

    /// Log file to write to, falling back to [`Config::default_log_path`].
    pub fn log_path(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(Self::default_log_path)
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{AnswerStyle, GenealogyWebsite};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[gemini]
model = "gemini-2.5-pro"
streaming = false

[ui]
default_website = "family-search"
default_style = "detailed"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert!(!config.gemini.streaming);
        assert_eq!(config.gemini.idle_timeout_seconds, 60);
        assert_eq!(config.ui.default_website, GenealogyWebsite::FamilySearch);
        assert_eq!(config.ui.default_style, AnswerStyle::Detailed);
        assert_eq!(config.ui.copy_ack_ms, 2000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gemini\nmodel = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = Config::default();
        config.gemini.idle_timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn empty_model_fails_validation() {
        let mut config = Config::default();
        config.gemini.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_path_ends_with_expected() {
        assert!(Config::config_path().ends_with("genealogy-assistant/config.toml"));
    }
}
