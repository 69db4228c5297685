use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::answer::{AnswerStyle, GenealogyWebsite};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API root, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Environment variables take precedence.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Stream fragments as they are generated (default: true).
    #[serde(default = "default_streaming")]
    pub streaming: bool,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Max wait for the response to start, or for the whole single-shot
    /// body, in seconds (default: 60).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Max gap between streamed chunks in seconds (default: 60).
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
}

/// Terminal UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Website preselected in the form.
    #[serde(default)]
    pub default_website: GenealogyWebsite,
    /// Answer style preselected in the form.
    #[serde(default)]
    pub default_style: AnswerStyle,
    /// UI tick interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long "Copied!" stays visible in milliseconds (default: 2000).
    #[serde(default = "default_copy_ack_ms")]
    pub copy_ack_ms: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Defaults to the platform data dir.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_streaming() -> bool {
    true
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_request_timeout() -> u32 {
    60
}

fn default_idle_timeout() -> u32 {
    60
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_copy_ack_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            streaming: default_streaming(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_website: GenealogyWebsite::default(),
            default_style: AnswerStyle::default(),
            tick_rate_ms: default_tick_rate_ms(),
            copy_ack_ms: default_copy_ack_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
