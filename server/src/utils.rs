use std::collections::HashMap;

use axum::{
    body::Bytes,
    http::{HeaderMap, header::CONTENT_TYPE},
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

// Accepted in order; the first present field wins.
const JSON_FIELDS: [&str; 4] = ["keyword", "q", "query", "search"];
const FORM_FIELDS: [&str; 2] = ["keyword", "q"];

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pulls the keyword out of a record body, sniffing by content type: JSON
/// bodies by field name, form bodies by field name, plain text verbatim.
/// Anything else gets one JSON attempt and then the `q` query parameter.
pub fn keyword_from_body(
    headers: &HeaderMap,
    query_fallback: Option<&str>,
    body: &Bytes,
) -> Option<String> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") {
        keyword_from_json(body)
    } else if content_type.contains("application/x-www-form-urlencoded") {
        keyword_from_form(body)
    } else if content_type.contains("text/plain") {
        String::from_utf8(body.to_vec()).ok()
    } else {
        keyword_from_json(body).or_else(|| query_fallback.map(str::to_string))
    }
}

fn keyword_from_json(body: &Bytes) -> Option<String> {
    let parsed: Value = serde_json::from_slice(body).ok()?;

    JSON_FIELDS.iter().find_map(|field| {
        parsed
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

fn keyword_from_form(body: &Bytes) -> Option<String> {
    let fields: HashMap<String, String> = serde_urlencoded::from_bytes(body).ok()?;

    FORM_FIELDS
        .iter()
        .find_map(|field| fields.get(*field).cloned())
}
