//! CLI command handlers.

mod capture;
mod config;
mod cookies;
mod output;

pub use capture::run_capture_command;
pub use config::run_config_show_command;
pub use cookies::{run_check_command, run_convert_command, run_domain_command};
