use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use genealogy_assistant::answer::{demo_client, AnswerClient, GeminiClient};
use genealogy_assistant::cli::Cli;
use genealogy_assistant::config::{Config, CredentialSource};
use genealogy_assistant::logging::init_tracing;
use genealogy_assistant::ui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let (client, source) = build_client(&cli, &config)?;

    let log_path = config.log_path();
    init_tracing(&log_path, &config.logging.level)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.gemini.model,
        streaming = config.gemini.streaming,
        credentials = ?source,
        "Starting genealogy assistant"
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let result = ui::run(&config.ui, client, runtime.handle().clone());
    runtime.shutdown_timeout(Duration::from_millis(500));
    result.context("Terminal UI failed")
}

fn build_client(
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<(Arc<dyn AnswerClient>, Option<CredentialSource>)> {
    if cli.demo {
        return Ok((Arc::new(demo_client()), None));
    }
    let (api_key, source) =
        config.resolve_api_key(cli.api_key.as_deref(), &cli.config_path())?;
    let client = GeminiClient::new(config.gemini_settings(api_key))
        .context("Failed to build HTTP client")?;
    Ok((Arc::new(client), Some(source)))
}
