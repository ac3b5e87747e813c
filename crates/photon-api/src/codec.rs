// Wire codec
//
// XML (de)serialization for request/response bodies, CSRF token scraping from
// the home page's <meta> tags, and the small string conventions the router
// uses for cookies and success markers.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::models::RouterErrorResponse;

/// Literal the router puts in the body of an accepted POST.
pub const OK_MARKER: &str = "<response>OK</response>";

/// Literal in the state-login body when the session is not logged in.
pub const LOGGED_OUT_MARKER: &str = "<State>-1</State>";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b([^>]*)>").expect("valid meta tag regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
        .expect("valid attribute regex")
});

// ── HTML / headers ───────────────────────────────────────────────────

/// Collect the trimmed `content` of every `<meta name="{name}" ...>` tag.
///
/// Attribute order, quoting style and whitespace are free. Tags with a
/// matching name but no `content` attribute are skipped.
pub fn extract_meta_content(html: &str, name: &str) -> Vec<String> {
    META_TAG
        .captures_iter(html)
        .filter_map(|tag| {
            let (tag_name, content) = meta_attributes(tag.get(1).map_or("", |m| m.as_str()));
            if tag_name == Some(name) {
                content.map(|c| c.trim().to_owned())
            } else {
                None
            }
        })
        .collect()
}

/// Pull the `name` and `content` attribute values out of a tag body.
fn meta_attributes(attrs: &str) -> (Option<&str>, Option<&str>) {
    let mut name = None;
    let mut content = None;
    for attr in ATTRIBUTE.captures_iter(attrs) {
        let key = attr.get(1).map_or("", |m| m.as_str());
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map(|m| m.as_str());
        if key.eq_ignore_ascii_case("name") {
            name = name.or(value);
        } else if key.eq_ignore_ascii_case("content") {
            content = content.or(value);
        }
    }
    (name, content)
}

/// First value of header `name`, if present and valid UTF-8.
///
/// Name matching is case-insensitive, as HTTP header names are.
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// The `name=value` pair of a `Set-Cookie` header, without attributes.
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split_once(';')
        .map_or(set_cookie, |(pair, _)| pair)
        .trim()
}

// ── XML ──────────────────────────────────────────────────────────────

/// Serialize a request body. `None` yields an empty string.
pub fn serialize_xml<T: Serialize>(value: Option<&T>) -> Result<String, Error> {
    let Some(value) = value else {
        return Ok(String::new());
    };
    let body = quick_xml::se::to_string(value).map_err(|e| Error::Xml(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// Deserialize a response body, keeping the raw text on failure.
pub fn deserialize_xml<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    quick_xml::de::from_str(body).map_err(|e| Error::MalformedResponse {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

/// Error code of an `<error>` reply, if the body is one.
pub fn router_error_code(body: &str) -> Option<u32> {
    if !body.contains("<error>") {
        return None;
    }
    deserialize_xml::<RouterErrorResponse>(body)
        .ok()
        .map(|e| e.code)
}
