//! Sign-in browsing: web-engine capabilities and the login session model.
//!
//! The page rendering, network access and cookie storage belong to a web
//! engine. This module only describes what the login flow needs from it:
//!
//! - [`WebEngine`] loads URLs and reports progress as [`PageEvent`]s
//! - [`CookieSource`] answers "which cookies does this URL carry now?"
//! - [`should_allow_navigation`] is the veto applied to every navigation
//!
//! [`LoginSession`] consumes the events and collects cookies after each
//! completed page load until the user dismisses it.

mod error;
mod http_engine;
mod session;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use tracing::debug;
use url::Url;

pub use error::EngineError;
pub use http_engine::{EngineTimeouts, HttpWebEngine, MAX_REDIRECTS};
pub use session::{CapturedSession, LoginSession};

/// Progress notifications delivered by a web engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The current page's title changed.
    TitleChanged(String),
    /// A page finished loading; `url` is the final URL after redirects.
    LoadFinished {
        /// URL of the loaded page, possibly empty when the engine does not know it.
        url: String,
    },
    /// The user closed the screen.
    Dismissed,
}

/// Returns whether a navigation to `url` may proceed.
///
/// Only `http` and `https` URLs are allowed. Anything else (app deep links,
/// `intent:`, `javascript:`, unparseable strings) is vetoed without error.
#[must_use]
pub fn should_allow_navigation(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => true,
        Ok(parsed) => {
            debug!(scheme = parsed.scheme(), "vetoing non-HTTP navigation");
            false
        }
        Err(error) => {
            debug!(%error, "vetoing navigation to unparseable URL");
            false
        }
    }
}

/// Read/write access to an engine's cookie store.
pub trait CookieSource: Send + Sync {
    /// Returns the `Cookie` header (`a=1; b=2`) the store would send to `url`.
    fn cookie_header(&self, url: &Url) -> Option<String>;

    /// Stores a `Set-Cookie` style string as if `url` had returned it.
    fn set_cookie(&self, url: &Url, set_cookie: &str);
}

impl CookieSource for Jar {
    fn cookie_header(&self, url: &Url) -> Option<String> {
        self.cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    fn set_cookie(&self, url: &Url, set_cookie: &str) {
        self.add_cookie_str(set_cookie, url);
    }
}

/// A page-loading engine.
///
/// Implementations report title changes and load completion as
/// [`PageEvent`]s on a channel handed to them at construction, and must
/// apply [`should_allow_navigation`] to the initial load and to every
/// redirect or link they follow.
#[async_trait]
pub trait WebEngine: Send + Sync {
    /// Navigates to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NavigationVetoed`] for disallowed URLs and
    /// network errors for pages that could not be fetched.
    async fn load(&self, url: &str) -> Result<(), EngineError>;

    /// The User-Agent the engine presents, to be reused by download clients.
    fn user_agent(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_allow_navigation_http_schemes() {
        assert!(should_allow_navigation("https://example.com/login"));
        assert!(should_allow_navigation("http://example.com"));
        assert!(should_allow_navigation("HTTPS://EXAMPLE.COM/"));
    }

    #[test]
    fn test_should_allow_navigation_vetoes_other_schemes() {
        assert!(!should_allow_navigation("intent://scan/#Intent;scheme=zxing;end"));
        assert!(!should_allow_navigation("javascript:alert(1)"));
        assert!(!should_allow_navigation("mailto:someone@example.com"));
        assert!(!should_allow_navigation("ftp://example.com/file"));
        assert!(!should_allow_navigation("youtube://watch?v=1"));
    }

    #[test]
    fn test_should_allow_navigation_vetoes_unparseable() {
        assert!(!should_allow_navigation("not a url"));
        assert!(!should_allow_navigation("/relative/path"));
        assert!(!should_allow_navigation(""));
    }

    #[test]
    fn test_jar_cookie_source_round_trip() {
        let jar = Jar::default();
        let url = Url::parse("https://example.com/").unwrap();
        assert!(jar.cookie_header(&url).is_none());

        jar.set_cookie(&url, "sid=abc; Path=/");
        jar.set_cookie(&url, "theme=dark; Path=/");
        let header = jar.cookie_header(&url).unwrap();
        assert!(header.contains("sid=abc"));
        assert!(header.contains("theme=dark"));
    }
}
