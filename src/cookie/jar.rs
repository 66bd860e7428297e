//! Loading captured cookies into a `reqwest` cookie jar.
//!
//! The jar is what download clients reuse: pass it to
//! `reqwest::ClientBuilder::cookie_provider()` and requests to the signed-in
//! site carry the captured session.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use reqwest::cookie::{CookieStore, Jar};
use tracing::{debug, instrument, warn};
use url::{Host, Url};

use super::record::CookieRecord;

/// Loads cookies into a fresh jar.
///
/// Each record is converted to a `Set-Cookie` string and added against an
/// origin URL built from its domain, so the jar's own domain matching
/// applies. Domains taken from page URLs may carry a port (`localhost:8080`);
/// those cookies, IP hosts and records without `include_subdomains` are
/// stored host-only. Records the jar refuses are logged and skipped.
#[instrument(level = "debug", skip(cookies))]
pub fn load_cookies_into_jar(cookies: &[CookieRecord]) -> Arc<Jar> {
    let jar = Arc::new(Jar::default());

    for cookie in cookies {
        let Ok(origin) = build_origin_url(cookie).parse::<Url>() else {
            warn!(
                domain = %cookie.domain,
                name = %cookie.name,
                "skipping cookie with unparseable domain"
            );
            continue;
        };

        let set_cookie = build_set_cookie_string(cookie, is_host_only(cookie, &origin));
        jar.add_cookie_str(&set_cookie, &origin);

        if jar_holds(&jar, &origin, &cookie.name) {
            debug!(domain = %cookie.domain, name = %cookie.name, "loaded cookie into jar");
        } else {
            warn!(
                domain = %cookie.domain,
                name = %cookie.name,
                "cookie jar rejected cookie"
            );
        }
    }

    jar
}

/// Cookies are not port-scoped, so a port or IP host cannot be expressed as a
/// `Domain` attribute.
fn is_host_only(cookie: &CookieRecord, origin: &Url) -> bool {
    !cookie.include_subdomains
        || origin.port().is_some()
        || !matches!(origin.host(), Some(Host::Domain(_)))
}

fn jar_holds(jar: &Jar, origin: &Url, name: &str) -> bool {
    jar.cookies(origin)
        .and_then(|value| value.to_str().ok().map(str::to_string))
        .is_some_and(|header| {
            header
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .any(|(existing, _)| existing == name)
        })
}

fn build_set_cookie_string(cookie: &CookieRecord, host_only: bool) -> String {
    let mut parts = vec![format!("{}={}", cookie.name, cookie.value())];
    if !host_only {
        parts.push(format!("Domain={}", cookie.domain));
    }
    parts.push(format!("Path={}", cookie.path));

    if cookie.secure {
        parts.push("Secure".to_string());
    }

    // 0 = session cookie, no Expires
    if cookie.expiry > 0 {
        if let Some(expires) = unix_to_http_date(cookie.expiry) {
            parts.push(format!("Expires={expires}"));
        } else {
            warn!(
                domain = %cookie.domain,
                name = %cookie.name,
                expiry = cookie.expiry,
                "cookie expiry timestamp overflows SystemTime; treating as session cookie"
            );
        }
    }

    parts.join("; ")
}

/// Uses `https://` for secure cookies, `http://` otherwise, without the
/// leading dot. A port in the domain is kept.
fn build_origin_url(cookie: &CookieRecord) -> String {
    let scheme = if cookie.secure { "https" } else { "http" };
    let domain = cookie.domain.strip_prefix('.').unwrap_or(&cookie.domain);
    format!("{scheme}://{domain}{}", cookie.path)
}

fn unix_to_http_date(timestamp: i64) -> Option<String> {
    let secs = u64::try_from(timestamp).ok()?;
    let time = UNIX_EPOCH.checked_add(Duration::from_secs(secs))?;
    Some(httpdate::fmt_http_date(time))
}
