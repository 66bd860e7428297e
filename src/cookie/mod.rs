//! Captured cookies and their export formats.
//!
//! Cookies read from a web engine's store become [`CookieRecord`]s, which can
//! be written as a Netscape cookie file, as JSON, or loaded into a
//! `reqwest` jar for authenticated downloads.

mod jar;
mod json;
mod netscape;
mod record;

pub use jar::load_cookies_into_jar;
pub use json::to_json_cookies;
pub use netscape::{
    CookieError, NETSCAPE_HEADER, ParseResult, parse_netscape_cookies, render_netscape_cookies,
    write_netscape_cookies,
};
pub use record::{
    CookieRecord, EXPORT_DELIMITER, extract_domain, make_cookie, parse_cookie_header,
};
