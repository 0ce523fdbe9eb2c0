//! Canonical shell text for filter documents.
//!
//! Filters render deterministically: keys in insertion order, 4-space
//! indentation, double-quoted keys and strings with JSON escaping. The
//! text layout exists for human-readable display and script embedding;
//! the logical content lives in the document itself.

use bson::{Bson, Document};

const INDENT: &str = "    ";

/// Renders a filter document at the top level.
pub fn render(document: &Document) -> String {
    render_at(document, 0)
}

/// Renders a filter document with its braces sitting at `level`, so the
/// text can be embedded inside an already-indented script line. The first
/// line carries no leading indentation; the caller positions it.
pub fn render_at(document: &Document, level: usize) -> String {
    let mut out = String::new();
    write_document(&mut out, document, level);
    out
}

fn write_document(out: &mut String, document: &Document, level: usize) {
    if document.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    let last = document.len() - 1;
    for (index, (key, value)) in document.iter().enumerate() {
        push_indent(out, level + 1);
        write_string(out, key);
        out.push_str(": ");
        write_value(out, value, level + 1);
        if index != last {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, level);
    out.push('}');
}

fn write_array(out: &mut String, items: &[Bson], level: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    let last = items.len() - 1;
    for (index, item) in items.iter().enumerate() {
        push_indent(out, level + 1);
        write_value(out, item, level + 1);
        if index != last {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, level);
    out.push(']');
}

fn write_value(out: &mut String, value: &Bson, level: usize) {
    match value {
        Bson::Document(document) => write_document(out, document, level),
        Bson::Array(items) => write_array(out, items, level),
        Bson::String(text) => write_string(out, text),
        Bson::Int32(number) => out.push_str(&number.to_string()),
        Bson::Int64(number) => out.push_str(&number.to_string()),
        // Debug formatting keeps the decimal point on round doubles.
        Bson::Double(number) => out.push_str(&format!("{number:?}")),
        Bson::Boolean(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Bson::Null => out.push_str("null"),
        other => out.push_str(&other.to_string()),
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            control if (control as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", control as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}
