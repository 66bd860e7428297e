//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sign in to a website and capture its session cookies.
///
/// Cookies are written in the Netscape cookie file format understood by
/// curl, wget and yt-dlp, so authenticated downloads can reuse the session.
#[derive(Parser, Debug)]
#[command(name = "cookie-capture")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the cookie domain derived from a URL
    Domain {
        /// Page URL (e.g. https://www.example.com/login)
        url: String,
    },

    /// Convert a raw `name=value; name2=value2` cookie header into a cookie file
    Convert(ConvertArgs),

    /// Load a sign-in page headlessly and capture the cookies it sets
    Capture(CaptureArgs),

    /// Validate a Netscape cookie file
    Check {
        /// Path to the cookie file
        file: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Cookie export formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Netscape HTTP Cookie File (TAB-separated)
    Netscape,
    /// JSON array in browser-extension shape
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Netscape => "netscape",
            Self::Json => "json",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format [default: netscape]
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Write cookies to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct ConvertArgs {
    /// URL of the page the cookies belong to
    #[arg(long)]
    pub url: String,

    /// Raw cookie header; read from stdin when omitted
    #[arg(long)]
    pub cookie: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

// Custom Debug impl that redacts the raw cookie header.
impl fmt::Debug for ConvertArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertArgs")
            .field("url", &self.url)
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("output", &self.output)
            .finish()
    }
}

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Sign-in page URL
    pub url: String,

    /// User-Agent to present (`tool` for the tool's own identifier)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Page load timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_domain_subcommand() {
        let cli = Cli::try_parse_from(["cookie-capture", "domain", "https://www.example.com/"]).unwrap();
        assert!(matches!(cli.command, Command::Domain { ref url } if url == "https://www.example.com/"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cookie-capture", "check", "cookies.txt", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["cookie-capture", "-q", "config", "show"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_convert_args() {
        let cli = Cli::try_parse_from([
            "cookie-capture",
            "convert",
            "--url",
            "https://example.com",
            "--cookie",
            "a=1; b=2",
            "-f",
            "json",
            "-o",
            "out.json",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.cookie.as_deref(), Some("a=1; b=2"));
        assert_eq!(args.output.format, Some(ExportFormat::Json));
        assert_eq!(args.output.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_cli_convert_requires_url() {
        let err = Cli::try_parse_from(["cookie-capture", "convert", "--cookie", "a=1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_convert_debug_redacts_cookie() {
        let cli = Cli::try_parse_from([
            "cookie-capture",
            "convert",
            "--url",
            "https://example.com",
            "--cookie",
            "session=hunter2",
        ])
        .unwrap();
        let debug_str = format!("{cli:?}");
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("https://example.com"));
    }

    #[test]
    fn test_cli_capture_timeout_range() {
        let cli = Cli::try_parse_from(["cookie-capture", "capture", "https://example.com", "--timeout", "10"]).unwrap();
        let Command::Capture(args) = cli.command else {
            panic!("expected capture");
        };
        assert_eq!(args.timeout, Some(10));
        assert_eq!(args.output.format, None);

        let err = Cli::try_parse_from(["cookie-capture", "capture", "https://example.com", "--timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_unknown_format_rejected() {
        let err = Cli::try_parse_from(["cookie-capture", "convert", "--url", "u", "-f", "xml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_subcommand_required() {
        assert!(Cli::try_parse_from(["cookie-capture"]).is_err());
    }

    #[test]
    fn test_cli_version_flag() {
        let err = Cli::try_parse_from(["cookie-capture", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
