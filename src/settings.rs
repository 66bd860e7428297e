//! Merges CLI flags over file configuration into effective settings.

use cookie_capture::{EngineTimeouts, resolve_user_agent};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::ExportFormat;

/// Effective settings for a command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) format: ExportFormat,
    pub(crate) user_agent: String,
    pub(crate) timeouts: EngineTimeouts,
}

/// CLI values that may override the config file.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliOverrides<'a> {
    pub(crate) format: Option<ExportFormat>,
    pub(crate) user_agent: Option<&'a str>,
    pub(crate) timeout_secs: Option<u64>,
}

pub(crate) fn resolve_settings(cli: CliOverrides<'_>, file_config: Option<&FileConfig>) -> Settings {
    let defaults = EngineTimeouts::default();

    let format = cli
        .format
        .or_else(|| file_config.and_then(|cfg| cfg.format))
        .unwrap_or(ExportFormat::Netscape);
    let user_agent = resolve_user_agent(
        cli.user_agent
            .or_else(|| file_config.and_then(|cfg| cfg.user_agent.as_deref())),
    );
    let timeouts = EngineTimeouts {
        connect_secs: file_config
            .and_then(|cfg| cfg.connect_timeout_secs)
            .unwrap_or(defaults.connect_secs),
        read_secs: cli
            .timeout_secs
            .or_else(|| file_config.and_then(|cfg| cfg.read_timeout_secs))
            .unwrap_or(defaults.read_secs),
    };

    Settings {
        format,
        user_agent,
        timeouts,
    }
}

/// Default log level for the subscriber.
///
/// Priority: `-q` > `-v` flags > config `verbosity` > info.
pub(crate) fn default_log_level(
    verbose: u8,
    quiet: bool,
    file_verbosity: Option<VerbositySetting>,
) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => match file_verbosity {
            Some(VerbositySetting::Quiet) => "error",
            Some(VerbositySetting::Verbose) => "debug",
            Some(VerbositySetting::Debug) => "trace",
            Some(VerbositySetting::Default) | None => "info",
        },
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie_capture::BROWSER_USER_AGENT;

    #[test]
    fn test_resolve_settings_defaults() {
        let settings = resolve_settings(CliOverrides::default(), None);
        assert_eq!(settings.format, ExportFormat::Netscape);
        assert_eq!(settings.user_agent, BROWSER_USER_AGENT);
        assert_eq!(settings.timeouts, EngineTimeouts::default());
    }

    #[test]
    fn test_resolve_settings_file_values_apply() {
        let file = FileConfig {
            user_agent: Some("FileAgent/1.0".to_string()),
            format: Some(ExportFormat::Json),
            connect_timeout_secs: Some(3),
            read_timeout_secs: Some(9),
            verbosity: None,
        };
        let settings = resolve_settings(CliOverrides::default(), Some(&file));
        assert_eq!(settings.format, ExportFormat::Json);
        assert_eq!(settings.user_agent, "FileAgent/1.0");
        assert_eq!(settings.timeouts.connect_secs, 3);
        assert_eq!(settings.timeouts.read_secs, 9);
    }

    #[test]
    fn test_resolve_settings_cli_overrides_file() {
        let file = FileConfig {
            user_agent: Some("FileAgent/1.0".to_string()),
            format: Some(ExportFormat::Json),
            read_timeout_secs: Some(9),
            ..FileConfig::default()
        };
        let cli = CliOverrides {
            format: Some(ExportFormat::Netscape),
            user_agent: Some("CliAgent/2.0"),
            timeout_secs: Some(42),
        };
        let settings = resolve_settings(cli, Some(&file));
        assert_eq!(settings.format, ExportFormat::Netscape);
        assert_eq!(settings.user_agent, "CliAgent/2.0");
        assert_eq!(settings.timeouts.read_secs, 42);
    }

    #[test]
    fn test_default_log_level_priority() {
        assert_eq!(default_log_level(0, false, None), "info");
        assert_eq!(default_log_level(1, false, None), "debug");
        assert_eq!(default_log_level(3, false, None), "trace");
        assert_eq!(default_log_level(2, true, None), "error");
        assert_eq!(default_log_level(0, false, Some(VerbositySetting::Quiet)), "error");
        assert_eq!(default_log_level(1, false, Some(VerbositySetting::Quiet)), "debug");
        assert_eq!(default_log_level(0, false, Some(VerbositySetting::Debug)), "trace");
    }
}
