//! The captured cookie value type and its Netscape export line.
//!
//! A [`CookieRecord`] is built from what a web engine's cookie store hands
//! back after a page load (`name=value` pairs scoped to a page URL) and is
//! serialized into the 7-field TAB-separated line used by Netscape cookie
//! files, which download tools such as `curl` and `yt-dlp` consume.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

/// Scheme plus one well-known login/landing subdomain label.
///
/// Only stripped when the URL carries an explicit `http(s)://` scheme.
#[allow(clippy::expect_used)]
static SCHEME_AND_LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:(?:www|m|account|sso)\.)?").expect("scheme regex is valid") // Static pattern, safe to panic
});

/// Field delimiter of the Netscape cookie file format.
pub const EXPORT_DELIMITER: char = '\t';

/// A single HTTP cookie captured for export or reuse.
///
/// The value field is redacted in Debug output so captured session tokens
/// never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CookieRecord {
    /// Host or host suffix the cookie applies to (e.g. `example.com`).
    pub domain: String,
    /// Cookie name.
    pub name: String,
    /// Cookie value (sensitive, never log).
    value: String,
    /// Whether subdomains of `domain` should match.
    pub include_subdomains: bool,
    /// The URL path scope for the cookie.
    pub path: String,
    /// Whether the cookie should only be sent over HTTPS.
    pub secure: bool,
    /// Unix timestamp for expiry (0 = session cookie).
    pub expiry: i64,
}

impl Default for CookieRecord {
    fn default() -> Self {
        Self {
            domain: String::new(),
            name: String::new(),
            value: String::new(),
            include_subdomains: true,
            path: "/".to_string(),
            secure: true,
            expiry: 0,
        }
    }
}

impl CookieRecord {
    /// Creates a cookie with default flags (subdomains, `/`, secure, session).
    #[must_use]
    pub fn new(domain: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Creates a cookie whose domain is derived from a page URL.
    #[must_use]
    pub fn for_url(url: &str, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(extract_domain(url), name, value)
    }

    #[must_use]
    pub fn with_include_subdomains(mut self, include_subdomains: bool) -> Self {
        self.include_subdomains = include_subdomains;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: i64) -> Self {
        self.expiry = expiry;
        self
    }

    /// Returns the cookie value.
    ///
    /// Sensitive: do not log the return value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether `other` names the same cookie slot (domain, name and path).
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.domain == other.domain && self.name == other.name && self.path == other.path
    }

    /// Formats the cookie as one Netscape cookie file line, without a line terminator.
    ///
    /// Field order is `domain`, `include_subdomains`, `path`, `secure`,
    /// `expiry`, `name`, `value`. Values are not escaped: a TAB inside a
    /// field produces a line other tools will misread.
    #[must_use]
    pub fn to_export_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = EXPORT_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.domain,
            netscape_bool(self.include_subdomains),
            self.path,
            netscape_bool(self.secure),
            self.expiry,
            self.name,
            self.value,
        )
    }
}

// Custom Debug impl that redacts the cookie value.
impl fmt::Debug for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieRecord")
            .field("domain", &self.domain)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("include_subdomains", &self.include_subdomains)
            .field("path", &self.path)
            .field("secure", &self.secure)
            .field("expiry", &self.expiry)
            .finish()
    }
}

fn netscape_bool(flag: bool) -> &'static str {
    if flag { "TRUE" } else { "FALSE" }
}

/// Derives a cookie domain from a page URL.
///
/// Strips a leading `http://`/`https://`, then one of the labels `www`, `m`,
/// `account` or `sso` directly after the scheme, then everything from the
/// first `/` onward. Input without a scheme only loses its path, so a bare
/// path such as `/login` yields an empty string.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    let host = SCHEME_AND_LABEL_PATTERN.replace(url, "");
    match host.find('/') {
        Some(end) => host[..end].to_string(),
        None => host.into_owned(),
    }
}

/// Builds a cookie from one raw `name=value` pair seen on `url`.
///
/// The pair is split on every `=`: the first segment becomes the name and
/// the last one the value, so interior segments of values such as base64
/// padding are dropped. A pair without `=` yields a cookie whose name and
/// value are both the whole input.
#[must_use]
pub fn make_cookie(url: &str, raw_cookie: &str) -> CookieRecord {
    if !raw_cookie.contains('=') {
        warn!(url, "cookie pair has no '=' separator; using it as both name and value");
    }

    let mut segments = raw_cookie.split('=');
    let name = segments.next().unwrap_or_default();
    let value = segments.next_back().unwrap_or(name);

    CookieRecord::for_url(url, name, value)
}

/// Splits a `Cookie` header (`a=1; b=2`) returned by a cookie store into records.
///
/// Empty segments are skipped; every other segment goes through [`make_cookie`].
#[instrument(level = "debug", skip(header))]
pub fn parse_cookie_header(url: &str, header: &str) -> Vec<CookieRecord> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let cookie = make_cookie(url, pair);
            debug!(domain = %cookie.domain, name = %cookie.name, "read cookie from header");
            cookie
        })
        .collect()
}
