//! JSON cookie export in the shape browser cookie extensions produce.

use serde::Serialize;

use super::record::CookieRecord;

#[derive(Debug, Serialize)]
struct JsonCookieEntry<'a> {
    domain: &'a str,
    name: &'a str,
    value: &'a str,
    path: &'a str,
    secure: bool,
    #[serde(rename = "hostOnly")]
    host_only: bool,
    #[serde(rename = "expirationDate", skip_serializing_if = "Option::is_none")]
    expiration_date: Option<i64>,
}

impl<'a> From<&'a CookieRecord> for JsonCookieEntry<'a> {
    fn from(cookie: &'a CookieRecord) -> Self {
        Self {
            domain: &cookie.domain,
            name: &cookie.name,
            value: cookie.value(),
            path: &cookie.path,
            secure: cookie.secure,
            host_only: !cookie.include_subdomains,
            expiration_date: (cookie.expiry > 0).then_some(cookie.expiry),
        }
    }
}

/// Serializes cookies as a pretty-printed JSON array.
///
/// Session cookies (`expiry == 0`) carry no `expirationDate`.
///
/// # Errors
///
/// Returns the serializer error; not expected for in-memory records.
pub fn to_json_cookies(cookies: &[CookieRecord]) -> serde_json::Result<String> {
    let entries: Vec<JsonCookieEntry<'_>> = cookies.iter().map(JsonCookieEntry::from).collect();
    serde_json::to_string_pretty(&entries)
}
