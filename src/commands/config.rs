//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::{LoadedConfig, VerbositySetting};
use crate::settings::Settings;

pub fn run_config_show_command(loaded_config: &LoadedConfig, settings: &Settings, log_level: &str) -> Result<()> {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file() {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("format = {}", settings.format.as_str());
    println!("user_agent = {}", settings.user_agent);
    println!("connect_timeout_secs = {}", settings.timeouts.connect_secs);
    println!("read_timeout_secs = {}", settings.timeouts.read_secs);
    println!(
        "verbosity = {}",
        loaded_config
            .config
            .as_ref()
            .and_then(|cfg| cfg.verbosity)
            .map_or("default", VerbositySetting::as_str)
    );
    println!("log_level = {log_level}");

    Ok(())
}
