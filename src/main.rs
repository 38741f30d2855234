use anyhow::Result;
use clap::Parser;
use funtime::{
    app::config::Config,
    cli::{self, Cli},
    source::WaifuClient,
    tui::run_tui,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first to get verbose flag
    let cli = Cli::parse();

    // Get logs directory (creates if needed)
    let logs_dir = funtime::util::paths::get_logs_dir().unwrap_or_else(|_| PathBuf::from("."));
    std::fs::create_dir_all(&logs_dir).ok();

    // Set up daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&logs_dir, "app.jsonl");
    let (non_blocking, log_guard) = tracing_appender::non_blocking(file_appender);

    // Set log level based on verbose flag
    let log_level = if cli.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    // Initialize logging with JSON format for structured logs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(
                    log_level,
                )),
        )
        .init();

    tracing::info!("Starting funtime...");
    if cli.verbose {
        tracing::info!("Verbose logging enabled (TRACE level)");
    }
    tracing::trace!("CLI arguments: {:?}", cli);

    // Set config directory override if --config flag was used
    if let Some(ref config_dir) = cli.config {
        tracing::info!("Using config directory override: {:?}", config_dir);
        funtime::util::paths::set_config_dir_override(Some(config_dir.clone()));
    }

    let config = if cli.command.as_ref().is_none_or(cli::handler::needs_config) {
        let mut config = Config::load()?;
        if let Some(endpoint) = cli.endpoint {
            config.api.endpoint = endpoint;
            if let Err(errors) = config.validate() {
                anyhow::bail!("Invalid configuration: {}", errors.join(", "));
            }
        }
        tracing::info!("Config loaded: {:?}", config);
        config
    } else {
        Config::default()
    };

    // Route based on CLI arguments
    match cli.command {
        Some(command) => {
            // CLI mode - handle command and exit
            let exit_code = cli::handler::handle_command(command, &config).await;
            // process::exit skips destructors; flush pending log lines first
            drop(log_guard);
            std::process::exit(exit_code);
        }
        None => {
            let client = WaifuClient::with_user_agent(&config.api.endpoint, &config.api.user_agent)?;
            run_tui(Arc::new(client), config.session_settings()).await?;
        }
    }

    Ok(())
}
