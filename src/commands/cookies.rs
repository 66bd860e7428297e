//! Offline cookie commands: domain derivation, header conversion, file checks.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use cookie_capture::{CookieRecord, extract_domain, parse_cookie_header, parse_netscape_cookies};
use tracing::{info, warn};

use crate::cli::ConvertArgs;
use crate::commands::output::write_cookies;
use crate::settings::Settings;

pub fn run_domain_command(url: &str) -> Result<()> {
    println!("{}", extract_domain(url));
    Ok(())
}

pub fn run_convert_command(args: &ConvertArgs, settings: &Settings) -> Result<()> {
    let header = match &args.cookie {
        Some(cookie) => cookie.clone(),
        None => read_cookie_header_from_stdin()?,
    };

    let cookies = parse_cookie_header(&args.url, &header);
    if cookies.is_empty() {
        bail!("No cookies found in input");
    }

    info!(
        cookies = cookies.len(),
        domain = %extract_domain(&args.url),
        "Converted cookie header"
    );
    write_cookies(&cookies, settings.format, args.output.output.as_deref())
}

pub fn run_check_command(file: &Path) -> Result<()> {
    let handle = File::open(file)
        .map_err(|e| anyhow!("Cannot open cookie file '{}': {e}", file.display()))?;
    let result = parse_netscape_cookies(BufReader::new(handle))
        .with_context(|| format!("Invalid cookie file '{}'", file.display()))?;

    for (line, reason) in &result.warnings {
        warn!(line, reason = %reason, "Skipping malformed cookie line");
    }

    println!("cookies = {}", result.cookies.len());
    println!("domains = {}", unique_domain_count(&result.cookies));
    println!("skipped_lines = {}", result.warnings.len());
    Ok(())
}

/// Counts cookie domains, treating `.example.com` and `example.com` as one.
fn unique_domain_count(cookies: &[CookieRecord]) -> usize {
    cookies
        .iter()
        .map(|cookie| cookie.domain.trim_start_matches('.'))
        .collect::<HashSet<_>>()
        .len()
}

fn read_cookie_header_from_stdin() -> Result<String> {
    if io::stdin().is_terminal() {
        bail!("No cookie data provided. Pass --cookie or pipe a cookie header via stdin");
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        bail!("No cookie data provided on stdin");
    }
    // Headers copied from devtools may be split across lines
    Ok(trimmed.lines().map(str::trim).collect::<Vec<_>>().join("; "))
}
