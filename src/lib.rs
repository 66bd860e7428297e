//! Cookie Capture Library
//!
//! Lets a user sign in to a website through a web engine and captures the
//! session cookies the site sets, so authenticated downloads can reuse them.
//!
//! # Architecture
//!
//! - [`cookie`] - the captured cookie record, domain derivation and the
//!   Netscape/JSON export formats, plus jar loading for download clients
//! - [`browser`] - web-engine capabilities, the navigation policy, the
//!   login session model and a headless `reqwest`-backed engine
//! - [`user_agent`] - User-Agent strings presented while signing in

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod cookie;
pub mod user_agent;

// Re-export commonly used types
pub use browser::{
    CapturedSession, CookieSource, EngineError, EngineTimeouts, HttpWebEngine, LoginSession,
    PageEvent, WebEngine, should_allow_navigation,
};
pub use cookie::{
    CookieError, CookieRecord, NETSCAPE_HEADER, ParseResult, extract_domain,
    load_cookies_into_jar, make_cookie, parse_cookie_header, parse_netscape_cookies,
    render_netscape_cookies, to_json_cookies, write_netscape_cookies,
};
pub use user_agent::{BROWSER_USER_AGENT, resolve_user_agent, tool_user_agent};
