//! Writing exported cookies to stdout or a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cookie_capture::{CookieRecord, to_json_cookies, write_netscape_cookies};
use tracing::info;

use crate::cli::ExportFormat;

/// Writes `cookies` in `format` to `output`, or to stdout when `output` is `None`.
pub(crate) fn write_cookies(
    cookies: &[CookieRecord],
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create cookie file '{}'", path.display()))?;
            write_formatted(BufWriter::new(file), cookies, format)
                .with_context(|| format!("Failed to write cookie file '{}'", path.display()))?;
            info!(
                path = %path.display(),
                cookies = cookies.len(),
                format = format.as_str(),
                "Wrote cookies"
            );
        }
        None => {
            write_formatted(io::stdout().lock(), cookies, format)
                .context("Failed to write cookies to stdout")?;
        }
    }
    Ok(())
}

fn write_formatted(mut writer: impl Write, cookies: &[CookieRecord], format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Netscape => write_netscape_cookies(writer, cookies)?,
        ExportFormat::Json => {
            let json = to_json_cookies(cookies)?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }
    }
    Ok(())
}
