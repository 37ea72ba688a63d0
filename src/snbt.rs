//! Stringified NBT formatting for command arguments.
//!
//! Give commands take item components inline (`id[name=value,...]`) with
//! values written as SNBT rather than JSON.

use serde_json::{Map, Value};

/// Format a JSON value as SNBT.
pub fn to_snbt(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Format a component map as the bracketed list body of an item argument.
///
/// Component ids are resource locations and are written unquoted.
pub fn component_list(components: &Map<String, Value>) -> String {
    components
        .iter()
        .map(|(id, value)| format!("{}={}", id, to_snbt(value)))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("{}"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            if n.is_f64() {
                out.push_str(&format!("{}d", n));
            } else {
                out.push_str(&n.to_string());
            }
        }
        Value::String(s) => write_string(out, s),
        Value::Array(values) => {
            out.push('[');
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, v);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_key(out, key);
                out.push(':');
                write_value(out, v);
            }
            out.push('}');
        }
    }
}

fn write_key(out: &mut String, key: &str) {
    if !key.is_empty() && key.chars().all(is_bare_char) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}
