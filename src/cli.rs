//! Command-line arguments and their config overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::answer::{AnswerStyle, GenealogyWebsite};
use crate::config::{Config, ConfigError};

#[derive(Parser, Debug, Default)]
#[command(name = "genealogy-assistant")]
#[command(version)]
#[command(about = "Genealogy AI Assistant: ask research questions about genealogy websites")]
#[command(long_about = "\
genealogy-assistant - Your personal guide to family history research

Ask a question about Ancestry, FamilySearch, MyHeritage, Findmypast or
23andMe and get a detailed explanation or a step-by-step guide, streamed
from Google Gemini.

CONFIGURATION:
    Configuration file: ~/.config/genealogy-assistant/config.toml

    [gemini]
    model = \"gemini-2.5-flash\"
    streaming = true

    [ui]
    default_website = \"ancestry\"
    default_style = \"step-by-step\"

API KEY:
    --api-key, then GEMINI_API_KEY, then API_KEY, then [gemini] api_key.

EXIT CODES:
    0 - Clean exit
    1 - Configuration or startup error
")]
pub struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gemini API key (overrides environment and config)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to query (overrides config)
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Website preselected in the form (e.g. ancestry, family-search)
    #[arg(long, value_name = "NAME")]
    pub website: Option<String>,

    /// Answer style preselected in the form (detailed, step-by-step)
    #[arg(long, value_name = "NAME")]
    pub style: Option<String>,

    /// Request the whole answer at once instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// Use canned answers instead of calling Gemini (no API key needed)
    #[arg(long)]
    pub demo: bool,

    /// Log filter directive, e.g. "debug" or "genealogy_assistant=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Cli {
    /// The file `--config` names, or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Load the config named by `--config` (or the default) and apply overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load_from(&self.config_path())?;
        self.apply_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(model) = &self.model {
            config.gemini.model = model.clone();
        }
        if self.no_stream {
            config.gemini.streaming = false;
        }
        if let Some(name) = &self.website {
            config.ui.default_website =
                GenealogyWebsite::parse(name).ok_or_else(|| ConfigError::ValidationError {
                    message: format!(
                        "unknown website '{name}' (expected one of: {})",
                        GenealogyWebsite::ALL
                            .iter()
                            .map(|site| site.label())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })?;
        }
        if let Some(name) = &self.style {
            config.ui.default_style =
                AnswerStyle::parse(name).ok_or_else(|| ConfigError::ValidationError {
                    message: format!("unknown answer style '{name}' (expected detailed or step-by-step)"),
                })?;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        Ok(())
    }
}
