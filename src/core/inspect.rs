//! Single-line inspection of structured values, used by the `o` formatter
//!
//! Output mirrors the usual REPL style: `{ foo: 'bar', list: [ 1, 2 ] }`.
//! Strings are single-quoted, keys that are plain identifiers stay bare, and
//! nesting beyond [`MAX_DEPTH`] collapses to `[Object]` / `[Array]`.

use super::value::{format_number, Value};
use serde_json::Value as Json;

pub const MAX_DEPTH: usize = 2;

const STRING_STYLE: (&str, &str) = ("\x1b[32m", "\x1b[39m");
const NUMBER_STYLE: (&str, &str) = ("\x1b[33m", "\x1b[39m");
const NULL_STYLE: (&str, &str) = ("\x1b[1m", "\x1b[22m");
const SPECIAL_STYLE: (&str, &str) = ("\x1b[36m", "\x1b[39m");

/// Inspect any argument value
pub fn inspect(value: &Value, colors: bool) -> String {
    match value {
        Value::Null => style("null", NULL_STYLE, colors),
        Value::Bool(b) => style(&b.to_string(), NUMBER_STYLE, colors),
        Value::Int(i) => style(&i.to_string(), NUMBER_STYLE, colors),
        Value::Float(f) => style(&format_number(*f), NUMBER_STYLE, colors),
        Value::Str(s) => style(&quote(s), STRING_STYLE, colors),
        Value::Object(json) => inspect_json(json, colors),
        Value::Error(err) => match err.stack() {
            Some(stack) => collapse_lines(stack),
            None => format!("[Error: {}]", err.message()),
        },
    }
}

/// Inspect a JSON-like structure
pub fn inspect_json(value: &Json, colors: bool) -> String {
    let mut out = String::new();
    write_json(&mut out, value, 0, colors);
    out
}

fn write_json(out: &mut String, value: &Json, depth: usize, colors: bool) {
    match value {
        Json::Null => out.push_str(&style("null", NULL_STYLE, colors)),
        Json::Bool(b) => out.push_str(&style(&b.to_string(), NUMBER_STYLE, colors)),
        Json::Number(n) => {
            let text = match n.as_i64() {
                Some(i) => i.to_string(),
                None => format_number(n.as_f64().unwrap_or(f64::NAN)),
            };
            out.push_str(&style(&text, NUMBER_STYLE, colors));
        }
        Json::String(s) => out.push_str(&style(&quote(s), STRING_STYLE, colors)),
        Json::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
            } else if depth > MAX_DEPTH {
                out.push_str(&style("[Array]", SPECIAL_STYLE, colors));
            } else {
                out.push_str("[ ");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_json(out, item, depth + 1, colors);
                }
                out.push_str(" ]");
            }
        }
        Json::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
            } else if depth > MAX_DEPTH {
                out.push_str(&style("[Object]", SPECIAL_STYLE, colors));
            } else {
                out.push_str("{ ");
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if is_identifier(key) {
                        out.push_str(key);
                    } else {
                        out.push_str(&style(&quote(key), STRING_STYLE, colors));
                    }
                    out.push_str(": ");
                    write_json(out, item, depth + 1, colors);
                }
                out.push_str(" }");
            }
        }
    }
}

fn style(text: &str, (open, close): (&str, &str), colors: bool) -> String {
    if colors {
        format!("{}{}{}", open, text, close)
    } else {
        text.to_string()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Fold every line break and the whitespace around it into one space
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
