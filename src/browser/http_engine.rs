//! Headless web engine over `reqwest`.
//!
//! Fetches pages with a cookie-jar-backed client, so every `Set-Cookie`
//! along a redirect chain lands in the jar, then reports the page title and
//! load completion as [`PageEvent`]s. It does not run scripts: sites whose
//! sign-in is a plain form or a cookie-setting redirect work, script-driven
//! logins need a real browser engine behind [`WebEngine`].

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{EngineError, PageEvent, WebEngine, should_allow_navigation};

/// Redirect hops followed before a load fails.
pub const MAX_REDIRECTS: usize = 10;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;

#[allow(clippy::expect_used)]
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex is valid") // Static pattern, safe to panic
});

/// Connect and overall request timeouts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimeouts {
    pub connect_secs: u64,
    pub read_secs: u64,
}

impl Default for EngineTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// A [`WebEngine`] that loads pages with a plain HTTP client.
#[derive(Debug)]
pub struct HttpWebEngine {
    client: Client,
    jar: Arc<Jar>,
    user_agent: String,
    events: mpsc::Sender<PageEvent>,
}

impl HttpWebEngine {
    /// Creates an engine with an empty cookie jar that reports to `events`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(
        user_agent: impl Into<String>,
        timeouts: EngineTimeouts,
        events: mpsc::Sender<PageEvent>,
    ) -> Result<Self, EngineError> {
        let user_agent = user_agent.into();
        let jar = Arc::new(Jar::default());
        let client = base_client_builder(Arc::clone(&jar), &user_agent, timeouts)
            .build()
            .map_err(EngineError::ClientBuild)?;

        Ok(Self {
            client,
            jar,
            user_agent,
            events,
        })
    }

    /// The jar holding every cookie the engine has received.
    #[must_use]
    pub fn cookie_jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    async fn emit(&self, event: PageEvent) {
        if self.events.send(event).await.is_err() {
            debug!("page event receiver closed; dropping event");
        }
    }
}

#[async_trait]
impl WebEngine for HttpWebEngine {
    #[instrument(level = "debug", skip(self))]
    async fn load(&self, url: &str) -> Result<(), EngineError> {
        if !should_allow_navigation(url) {
            warn!(url, "refusing to load non-HTTP URL");
            return Err(EngineError::NavigationVetoed {
                url: url.to_string(),
            });
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::from_request(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            // Login pages answer 401/403 and still set cookies; keep going.
            warn!(url = %final_url, status = status.as_u16(), "page returned non-success status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::from_request(&final_url, e))?;

        if let Some(title) = extract_title(&body) {
            self.emit(PageEvent::TitleChanged(title)).await;
        }
        info!(url = %final_url, status = status.as_u16(), "page loaded");
        self.emit(PageEvent::LoadFinished { url: final_url }).await;

        Ok(())
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn base_client_builder(jar: Arc<Jar>, user_agent: &str, timeouts: EngineTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .gzip(true)
        .user_agent(user_agent)
        .cookie_provider(jar)
        .redirect(navigation_redirect_policy())
}

/// Follows redirects only to HTTP(S) targets, up to [`MAX_REDIRECTS`] hops.
///
/// A redirect to a vetoed scheme stops the chain and the redirect response
/// itself becomes the loaded page.
fn navigation_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if should_allow_navigation(attempt.url().as_str()) {
            attempt.follow()
        } else {
            debug!(target_url = %attempt.url(), "redirect vetoed by navigation policy");
            attempt.stop()
        }
    })
}

/// First `<title>` of an HTML document, whitespace-collapsed; `None` if absent or blank.
fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_PATTERN.captures(html)?.get(1)?.as_str();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}
