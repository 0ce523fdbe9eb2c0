//! Raw value parsing for condition values.
//!
//! Conditions carry their value as the raw string the user typed. This
//! module turns that string into a typed [`Bson`] value appropriate to the
//! condition's operator. Parsing is total: every non-empty input maps to
//! some value, with malformed numeric-looking text falling through to the
//! string branch and malformed bracketed lists falling back to
//! comma-splitting.

use bson::{Bson, Document};
use serde_json::Value;

use crate::condition::Operator;

/// Parses a raw value string into a typed BSON value for `operator`.
///
/// List operators (`$in`, `$nin`, `$all`) always produce a `Bson::Array`;
/// every other operator produces a scalar.
pub fn parse_value(raw: &str, operator: Operator) -> Bson {
    if operator.takes_list() {
        return Bson::Array(parse_list(raw));
    }
    parse_scalar(raw)
}

/// Scalar parsing rules, first match wins: float (only when a `.` is
/// present), integer, boolean, null, then string with one layer of
/// surrounding quotes stripped.
fn parse_scalar(raw: &str) -> Bson {
    let trimmed = raw.trim();

    if trimmed.contains('.') {
        if let Ok(number) = trimmed.parse::<f64>() {
            return Bson::Double(number);
        }
    }
    if let Ok(number) = trimmed.parse::<i64>() {
        return Bson::Int64(number);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Bson::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Bson::Boolean(false);
    }
    if trimmed.eq_ignore_ascii_case("null") {
        return Bson::Null;
    }

    Bson::String(strip_quotes(trimmed).to_string())
}

/// Bracketed input is tried as a strict JSON array first; on failure the
/// outer brackets are stripped and the inner text comma-split into string
/// tokens. Unbracketed input is comma-split directly.
fn parse_list(raw: &str) -> Vec<Bson> {
    let trimmed = raw.trim();

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return items.iter().map(json_to_bson).collect();
        }
        return split_tokens(&trimmed[1..trimmed.len() - 1]);
    }

    split_tokens(trimmed)
}

/// Comma-splits `text` into trimmed, de-quoted string tokens. Fallback
/// tokens stay strings; no numeric or boolean coercion is applied.
fn split_tokens(text: &str) -> Vec<Bson> {
    text.split(',')
        .map(|piece| Bson::String(strip_quotes(piece.trim()).to_string()))
        .collect()
}

/// Strips at most one layer of matching single or double quotes.
fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(flag) => Bson::Boolean(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Bson::Int64(int),
            None => Bson::Double(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => Bson::String(text.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => {
            let mut document = Document::new();
            for (key, item) in map {
                document.insert(key.clone(), json_to_bson(item));
            }
            Bson::Document(document)
        }
    }
}
