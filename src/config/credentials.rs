//! API key resolution.
//!
//! The key is looked up in a fixed order: command line, `GEMINI_API_KEY`,
//! `API_KEY`, then `[gemini] api_key` in the config file.

use std::path::Path;
use std::time::Duration;

use super::loader::ConfigError;
use super::types::Config;
use crate::answer::{GeminiSettings, ResponseMode};

/// Environment variables consulted for the API key, highest priority first.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    CommandLine,
    Environment(&'static str),
    ConfigFile,
}

impl Config {
    /// Resolve the API key from the process environment.
    ///
    /// `config_path` is the file this config was loaded from; it is named
    /// in the error when no key is found.
    pub fn resolve_api_key(
        &self,
        cli_override: Option<&str>,
        config_path: &Path,
    ) -> Result<(SecureString, CredentialSource), ConfigError> {
        self.resolve_api_key_with(cli_override, config_path, |name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` for environment variables.
    ///
    /// Blank values are skipped at every level.
    pub fn resolve_api_key_with<F>(
        &self,
        cli_override: Option<&str>,
        config_path: &Path,
        lookup: F,
    ) -> Result<(SecureString, CredentialSource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = non_blank(cli_override.map(str::to_string)) {
            return Ok((SecureString::new(key), CredentialSource::CommandLine));
        }
        for name in API_KEY_ENV_VARS {
            if let Some(key) = non_blank(lookup(name)) {
                return Ok((SecureString::new(key), CredentialSource::Environment(name)));
            }
        }
        if let Some(key) = non_blank(self.gemini.api_key.clone()) {
            return Ok((SecureString::new(key), CredentialSource::ConfigFile));
        }
        Err(ConfigError::MissingApiKey {
            path: config_path.to_path_buf(),
        })
    }

    /// Build client settings from this config and a resolved key.
    pub fn gemini_settings(&self, api_key: SecureString) -> GeminiSettings {
        let gemini = &self.gemini;
        GeminiSettings {
            base_url: gemini.base_url.clone(),
            model: gemini.model.clone(),
            api_key,
            mode: if gemini.streaming {
                ResponseMode::Streaming
            } else {
                ResponseMode::SingleShot
            },
            connect_timeout: Duration::from_secs(gemini.connect_timeout_seconds.into()),
            request_timeout: Duration::from_secs(gemini.request_timeout_seconds.into()),
            idle_timeout: Duration::from_secs(gemini.idle_timeout_seconds.into()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn path() -> &'static Path {
        Path::new("config.toml")
    }

    fn config_with_key(key: Option<&str>) -> Config {
        let mut config = Config::default();
        config.gemini.api_key = key.map(str::to_string);
        config
    }

    #[test]
    fn command_line_wins() {
        let config = config_with_key(Some("from-file"));
        let (key, source) = config
            .resolve_api_key_with(
                Some("from-cli"),
                path(),
                env(&[("GEMINI_API_KEY", "from-env")]),
            )
            .unwrap();
        assert_eq!(key.expose(), "from-cli");
        assert_eq!(source, CredentialSource::CommandLine);
    }

    #[test]
    fn gemini_env_beats_generic_env() {
        let config = config_with_key(None);
        let (key, source) = config
            .resolve_api_key_with(
                None,
                path(),
                env(&[("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]),
            )
            .unwrap();
        assert_eq!(key.expose(), "gemini");
        assert_eq!(source, CredentialSource::Environment("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_values_are_skipped() {
        let config = config_with_key(Some("from-file"));
        let (key, source) = config
            .resolve_api_key_with(
                Some("  "),
                path(),
                env(&[("GEMINI_API_KEY", ""), ("API_KEY", " ")]),
            )
            .unwrap();
        assert_eq!(key.expose(), "from-file");
        assert_eq!(source, CredentialSource::ConfigFile);
    }

    #[test]
    fn nothing_configured_is_missing_key() {
        let config = config_with_key(None);
        let err = config.resolve_api_key_with(None, path(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn missing_key_names_the_loaded_file() {
        let config = config_with_key(None);
        let custom = Path::new("/srv/research/assistant.toml");
        let err = config.resolve_api_key_with(None, custom, env(&[])).unwrap_err();
        assert!(err.to_string().contains("/srv/research/assistant.toml"));
    }

    #[test]
    fn secure_string_is_masked() {
        let secret = SecureString::new("sk-secret".to_string());
        assert!(!format!("{secret:?}").contains("sk-secret"));
        assert!(!format!("{secret}").contains("sk-secret"));
        assert_eq!(secret.expose(), "sk-secret");
    }

    #[test]
    fn settings_follow_streaming_flag() {
        let mut config = Config::default();
        config.gemini.streaming = false;
        config.gemini.idle_timeout_seconds = 30;
        config.gemini.request_timeout_seconds = 90;
        let settings = config.gemini_settings(SecureString::new("k".to_string()));
        assert_eq!(settings.mode, ResponseMode::SingleShot);
        assert_eq!(settings.request_timeout, Duration::from_secs(90));
        assert_eq!(settings.idle_timeout, Duration::from_secs(30));
        assert_eq!(settings.model, "gemini-2.5-flash");
    }
}
