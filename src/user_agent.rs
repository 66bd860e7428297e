//! User-Agent strings for the sign-in engine.
//!
//! Sites bind sessions to the browser they were created in, so the captured
//! cookies are only useful to a downloader presenting the same User-Agent.
//! The default is therefore a mainstream browser string rather than one
//! identifying this tool.

/// Browser User-Agent presented while signing in.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// User-Agent identifying the tool, for users who prefer not to impersonate a browser.
#[must_use]
pub fn tool_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("cookie-capture/{version} (session-capture-tool)")
}

/// Picks the configured User-Agent, falling back to [`BROWSER_USER_AGENT`].
///
/// The literal value `tool` selects [`tool_user_agent`].
#[must_use]
pub fn resolve_user_agent(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some("") | None => BROWSER_USER_AGENT.to_string(),
        Some("tool") => tool_user_agent(),
        Some(other) => other.to_string(),
    }
}
