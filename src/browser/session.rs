//! The sign-in screen model.
//!
//! A [`LoginSession`] tracks the page title shown in the title bar and the
//! cookies collected so far. After every completed page load it asks the
//! [`CookieSource`] for the cookies of that page and merges them in; when
//! the user closes the screen the dismiss callback sees the final state.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use super::{CookieSource, PageEvent};
use crate::cookie::{CookieRecord, parse_cookie_header};

type DismissCallback = Box<dyn FnOnce(&CapturedSession) + Send>;

/// What a finished login session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSession {
    /// The URL the session was opened on.
    pub url: String,
    /// Last page title observed (empty if none).
    pub title: String,
    /// Collected cookies in first-seen order.
    pub cookies: Vec<CookieRecord>,
    /// User-Agent of the engine that set the cookies, when known.
    pub user_agent: Option<String>,
}

/// State behind the sign-in screen.
pub struct LoginSession {
    captured: CapturedSession,
    cookie_source: Arc<dyn CookieSource>,
    on_dismiss: Option<DismissCallback>,
    open: bool,
}

impl fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginSession")
            .field("captured", &self.captured)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl LoginSession {
    /// Opens a session for `url`, reading cookies from `cookie_source`.
    #[must_use]
    pub fn new(url: impl Into<String>, cookie_source: Arc<dyn CookieSource>) -> Self {
        Self {
            captured: CapturedSession {
                url: url.into(),
                title: String::new(),
                cookies: Vec::new(),
                user_agent: None,
            },
            cookie_source,
            on_dismiss: None,
            open: true,
        }
    }

    /// Records the engine's User-Agent so downloads can present the same one.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.captured.user_agent = Some(user_agent.into());
        self
    }

    /// Registers the callback invoked once when the session is dismissed.
    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnOnce(&CapturedSession) + Send + 'static) -> Self {
        self.on_dismiss = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.captured.url
    }

    /// Title for the title bar; empty until the engine reports one.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.captured.title
    }

    #[must_use]
    pub fn cookies(&self) -> &[CookieRecord] {
        &self.captured.cookies
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Applies one engine event. Returns whether the session is still open.
    ///
    /// Events arriving after dismissal are ignored.
    pub fn handle_event(&mut self, event: PageEvent) -> bool {
        if !self.open {
            debug!(?event, "ignoring event for dismissed session");
            return false;
        }

        match event {
            PageEvent::TitleChanged(title) => {
                debug!(%title, "page title changed");
                self.captured.title = title;
            }
            PageEvent::LoadFinished { url } => {
                if url.is_empty() {
                    return true;
                }
                self.collect_cookies(&url);
            }
            PageEvent::Dismissed => self.dismiss(),
        }

        self.open
    }

    /// Consumes events until the user dismisses the session or the engine
    /// side of the channel closes.
    pub async fn run(mut self, mut events: mpsc::Receiver<PageEvent>) -> CapturedSession {
        while let Some(event) = events.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }

        if self.open {
            debug!("event channel closed; dismissing session");
            self.dismiss();
        }

        self.captured
    }

    /// Closes the session, invoking the dismiss callback if it has not run yet.
    pub fn dismiss(&mut self) {
        self.open = false;
        if let Some(callback) = self.on_dismiss.take() {
            callback(&self.captured);
        }
        info!(
            url = %self.captured.url,
            cookies = self.captured.cookies.len(),
            "login session dismissed"
        );
    }

    fn collect_cookies(&mut self, page_url: &str) {
        let parsed = match Url::parse(page_url) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(url = page_url, %error, "cannot read cookies for unparseable page URL");
                return;
            }
        };

        let Some(header) = self.cookie_source.cookie_header(&parsed) else {
            debug!(url = page_url, "page has no cookies");
            return;
        };

        for cookie in parse_cookie_header(page_url, &header) {
            self.merge(cookie);
        }
        debug!(
            url = page_url,
            total = self.captured.cookies.len(),
            "collected cookies after page load"
        );
    }

    fn merge(&mut self, cookie: CookieRecord) {
        match self
            .captured
            .cookies
            .iter_mut()
            .find(|existing| existing.same_slot(&cookie))
        {
            Some(existing) => *existing = cookie,
            None => self.captured.cookies.push(cookie),
        }
    }
}
