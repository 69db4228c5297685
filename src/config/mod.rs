mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialSource, SecureString, API_KEY_ENV_VARS};
pub use loader::ConfigError;
pub use types::{Config, GeminiConfig, LoggingConfig, UiConfig};
