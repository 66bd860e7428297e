//! CLI entry point for cookie-capture.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod settings;

use app_config::load_default_file_config;
use cli::{Cli, Command, ConfigCommand};
use settings::{CliOverrides, default_log_level, resolve_settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Config errors surface after logging is up; until then only flags decide the level.
    let loaded_config = load_default_file_config();
    let file_config = loaded_config
        .as_ref()
        .ok()
        .and_then(|loaded| loaded.config.as_ref());

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = default_log_level(
        cli.verbose,
        cli.quiet,
        file_config.and_then(|cfg| cfg.verbosity),
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");
    let loaded_config = loaded_config?;
    let file_config = loaded_config.config.as_ref();

    match &cli.command {
        Command::Domain { url } => commands::run_domain_command(url),
        Command::Convert(args) => {
            let overrides = CliOverrides {
                format: args.output.format,
                ..CliOverrides::default()
            };
            commands::run_convert_command(args, &resolve_settings(overrides, file_config))
        }
        Command::Capture(args) => {
            let overrides = CliOverrides {
                format: args.output.format,
                user_agent: args.user_agent.as_deref(),
                timeout_secs: args.timeout,
            };
            commands::run_capture_command(args, &resolve_settings(overrides, file_config)).await
        }
        Command::Check { file } => commands::run_check_command(file),
        Command::Config {
            command: ConfigCommand::Show,
        } => commands::run_config_show_command(
            &loaded_config,
            &resolve_settings(CliOverrides::default(), file_config),
            default_level,
        ),
    }
}
