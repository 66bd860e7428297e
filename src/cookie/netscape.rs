//! Netscape cookie file writer and reader.
//!
//! The file is a `# Netscape HTTP Cookie File` header followed by one
//! 7-field TAB-separated line per cookie (see [`CookieRecord::to_export_line`]).
//! The reader accepts files written by browsers and export extensions, so it
//! tolerates comments, blank lines and CRLF endings.

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument, warn};

use super::record::CookieRecord;

/// First line of every cookie file this crate writes.
pub const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File";

/// Errors that can occur while reading a cookie file.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A line in the cookie file has an invalid format.
    #[error("line {line_number}: {reason} (got: {content})")]
    InvalidLine {
        /// 1-based line number in the cookie file.
        line_number: usize,
        /// The offending line content (value redacted).
        content: String,
        /// Description of what was wrong.
        reason: String,
    },

    /// I/O error reading the cookie file.
    #[error("failed to read cookie file: {0}")]
    Io(#[from] io::Error),

    /// No valid cookies found in a non-empty file.
    #[error("no valid cookies found in file ({malformed_count} lines failed to parse)")]
    NoCookiesFound {
        /// Number of malformed lines encountered.
        malformed_count: usize,
    },
}

/// Cookies read from a file plus the lines that were skipped.
#[derive(Debug)]
pub struct ParseResult {
    /// Successfully parsed cookies.
    pub cookies: Vec<CookieRecord>,
    /// Warnings for malformed lines (line number and reason).
    pub warnings: Vec<(usize, String)>,
}

/// Writes the header and one line per cookie to `writer`.
///
/// # Errors
///
/// Returns any I/O error raised by the writer.
pub fn write_netscape_cookies(mut writer: impl Write, cookies: &[CookieRecord]) -> io::Result<()> {
    writeln!(writer, "{NETSCAPE_HEADER}")?;
    for cookie in cookies {
        writeln!(writer, "{cookie}")?;
    }
    writer.flush()
}

/// Renders a whole cookie file into a string.
#[must_use]
pub fn render_netscape_cookies(cookies: &[CookieRecord]) -> String {
    let mut out = String::with_capacity(NETSCAPE_HEADER.len() + 1 + cookies.len() * 64);
    out.push_str(NETSCAPE_HEADER);
    out.push('\n');
    for cookie in cookies {
        out.push_str(&cookie.to_export_line());
        out.push('\n');
    }
    out
}

/// Parses a Netscape-format cookie file from a buffered reader.
///
/// Each non-comment, non-blank line must contain exactly 7 TAB-separated fields.
/// Lines starting with `#` and blank lines are skipped.
///
/// # Errors
///
/// Returns [`CookieError::Io`] on read failure, or
/// [`CookieError::NoCookiesFound`] when a non-empty file yields zero valid cookies.
/// Individual malformed lines are collected as warnings.
#[instrument(level = "debug", skip(reader))]
pub fn parse_netscape_cookies(reader: impl BufRead) -> Result<ParseResult, CookieError> {
    let mut cookies = Vec::new();
    let mut warnings = Vec::new();
    let mut data_lines = 0;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        // CRLF files leave a trailing \r
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        data_lines += 1;

        match parse_cookie_line(line, line_number) {
            Ok(cookie) => {
                debug!(
                    line = line_number,
                    domain = %cookie.domain,
                    name = %cookie.name,
                    "parsed cookie"
                );
                cookies.push(cookie);
            }
            Err(e) => {
                warn!(line = line_number, reason = %e, "skipping malformed cookie line");
                warnings.push((line_number, e.to_string()));
            }
        }
    }

    if cookies.is_empty() && data_lines > 0 {
        return Err(CookieError::NoCookiesFound {
            malformed_count: warnings.len(),
        });
    }

    Ok(ParseResult { cookies, warnings })
}

fn parse_cookie_line(line: &str, line_number: usize) -> Result<CookieRecord, CookieError> {
    let invalid = |reason: String| CookieError::InvalidLine {
        line_number,
        content: redact_line_for_error(line),
        reason,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    let [domain, include_subdomains, path, secure, expiry, name, value] = fields[..] else {
        return Err(invalid(format!(
            "expected 7 TAB-separated fields, found {}",
            fields.len()
        )));
    };

    let include_subdomains = parse_bool_field(include_subdomains, "include_subdomains")
        .map_err(&invalid)?;
    let secure = parse_bool_field(secure, "secure").map_err(&invalid)?;

    let expiry = expiry
        .parse::<i64>()
        .ok()
        .filter(|expiry| *expiry >= 0)
        .ok_or_else(|| {
            invalid(format!(
                "expiry field must be a non-negative integer, got '{expiry}'"
            ))
        })?;

    if domain.is_empty() {
        return Err(invalid("domain field is empty".to_string()));
    }
    if name.is_empty() {
        return Err(invalid("cookie name field is empty".to_string()));
    }

    Ok(CookieRecord::new(domain, name, value)
        .with_include_subdomains(include_subdomains)
        .with_path(path)
        .with_secure(secure)
        .with_expiry(expiry))
}

fn parse_bool_field(value: &str, field_name: &str) -> Result<bool, String> {
    match value {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(format!(
            "{field_name} field must be TRUE or FALSE, got '{value}'"
        )),
    }
}

/// Redacts the cookie value (7th field) from a line for safe error messages.
fn redact_line_for_error(line: &str) -> String {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() >= 7 {
        let mut redacted = fields[..6].join("\t");
        redacted.push_str("\t[REDACTED]");
        redacted
    } else {
        // Not enough fields to locate a value
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(s: &str) -> Cursor<&[u8]> {
        Cursor::new(s.as_bytes())
    }

    #[test]
    fn test_render_netscape_cookies_header_and_lines() {
        let cookies = vec![
            CookieRecord::new("example.com", "session", "abc123"),
            CookieRecord::new("example.com", "pref", "x").with_secure(false),
        ];
        let rendered = render_netscape_cookies(&cookies);
        assert_eq!(
            rendered,
            "# Netscape HTTP Cookie File\n\
             example.com\tTRUE\t/\tTRUE\t0\tsession\tabc123\n\
             example.com\tTRUE\t/\tFALSE\t0\tpref\tx\n"
        );
    }

    #[test]
    fn test_write_netscape_cookies_matches_render() {
        let cookies = vec![CookieRecord::new("example.com", "a", "1")];
        let mut buf = Vec::new();
        write_netscape_cookies(&mut buf, &cookies).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_netscape_cookies(&cookies));
    }

    #[test]
    fn test_render_netscape_cookies_empty_has_only_header() {
        assert_eq!(render_netscape_cookies(&[]), "# Netscape HTTP Cookie File\n");
    }

    #[test]
    fn test_parse_netscape_cookies_valid_file() {
        let input = "\
# Netscape HTTP Cookie File
.example.com\tTRUE\t/\tFALSE\t0\tsession\tabc123
.other.com\tFALSE\t/path\tTRUE\t1700000000\ttoken\txyz789
";
        let result = parse_netscape_cookies(cursor(input)).unwrap();
        assert_eq!(result.cookies.len(), 2);
        assert!(result.warnings.is_empty());

        assert_eq!(result.cookies[0].domain, ".example.com");
        assert!(result.cookies[0].include_subdomains);
        assert!(!result.cookies[0].secure);
        assert_eq!(result.cookies[0].value(), "abc123");

        assert!(!result.cookies[1].include_subdomains);
        assert_eq!(result.cookies[1].path, "/path");
        assert_eq!(result.cookies[1].expiry, 1_700_000_000);
    }

    #[test]
    fn test_parse_netscape_cookies_reads_back_rendered_file() {
        let cookies = vec![
            CookieRecord::new("example.com", "session", "abc123"),
            CookieRecord::new("example.com", "pref", "").with_expiry(42),
        ];
        let rendered = render_netscape_cookies(&cookies);
        let result = parse_netscape_cookies(cursor(&rendered)).unwrap();
        assert_eq!(result.cookies, cookies);
    }

    #[test]
    fn test_parse_netscape_cookies_malformed_lines_with_line_numbers() {
        let input = "\
# Header
.good.com\tTRUE\t/\tFALSE\t0\tname\tvalue
bad line without tabs
.also-good.com\tTRUE\t/\tFALSE\t0\tother\tval
";
        let result = parse_netscape_cookies(cursor(input)).unwrap();
        assert_eq!(result.cookies.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].0, 3);
        assert!(result.warnings[0].1.contains("expected 7 TAB-separated fields"));
    }

    #[test]
    fn test_parse_netscape_cookies_empty_and_comment_only() {
        assert!(parse_netscape_cookies(cursor("")).unwrap().cookies.is_empty());
        let result = parse_netscape_cookies(cursor("# Netscape HTTP Cookie File\n# c\n")).unwrap();
        assert!(result.cookies.is_empty());
    }

    #[test]
    fn test_parse_netscape_cookies_all_malformed_returns_error() {
        let err = parse_netscape_cookies(cursor("bad line one\nanother bad line\n")).unwrap_err();
        assert!(
            matches!(err, CookieError::NoCookiesFound { malformed_count: 2 }),
            "expected NoCookiesFound with 2 malformed, got: {err}"
        );
    }

    #[test]
    fn test_parse_netscape_cookies_rejects_bad_fields() {
        for line in [
            ".example.com\tYES\t/\tFALSE\t0\tname\tvalue\n",
            ".example.com\tTRUE\t/\tFALSE\tsoon\tname\tvalue\n",
            ".example.com\tTRUE\t/\tFALSE\t-5\tname\tvalue\n",
            "\tTRUE\t/\tFALSE\t0\tname\tvalue\n",
            ".example.com\tTRUE\t/\tFALSE\t0\t\tvalue\n",
        ] {
            assert!(parse_netscape_cookies(cursor(line)).is_err(), "accepted: {line:?}");
        }
    }

    #[test]
    fn test_parse_netscape_cookies_crlf_line_endings() {
        let input = "# Header\r\n.example.com\tTRUE\t/\tFALSE\t0\tname\tvalue\r\n";
        let result = parse_netscape_cookies(cursor(input)).unwrap();
        assert_eq!(result.cookies.len(), 1);
        assert_eq!(result.cookies[0].value(), "value");
    }

    #[test]
    fn test_invalid_line_error_redacts_value() {
        let input = ".example.com\tMAYBE\t/\tFALSE\t0\tname\tsecret_value\n";
        let result = parse_netscape_cookies(cursor(input));
        assert!(result.is_err());

        let redacted = redact_line_for_error(input.trim_end());
        assert!(!redacted.contains("secret_value"));
        assert!(redacted.contains("[REDACTED]"));
        assert!(redacted.contains("name"));
    }
}
