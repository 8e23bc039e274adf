//! Serializers: canonical TOML and JSON renderings of a document tree.
//!
//! Both walk tables in insertion order. The JSON form is the pretty,
//! two-space-indented shape with a space before each colon; the TOML form
//! writes each table's leaf assignments first and then its subtables as
//! `[dotted.path]` sections (arrays-of-tables as `[[dotted.path]]`).

#[cfg(test)]
#[path = "./ser_tests.rs"]
mod tests;

use crate::array::{Array, ArrayKind};
use crate::table::Table;
use crate::value::Value;
use std::fmt::Write as _;

// ---- JSON ---------------------------------------------------------------

pub(crate) fn to_json(root: &Table) -> String {
    let mut out = String::new();
    write_json_table(&mut out, root, 0);
    out.push('\n');
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_json_table(out: &mut String, table: &Table, depth: usize) {
    if table.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, (key, value)) in table.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        indent(out, depth + 1);
        write_json_string(out, &key.name);
        out.push_str(" : ");
        write_json_value(out, value, depth + 1);
    }
    out.push('\n');
    indent(out, depth);
    out.push('}');
}

fn write_json_array(out: &mut String, array: &Array, depth: usize) {
    if array.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for (i, value) in array.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        indent(out, depth + 1);
        write_json_value(out, value, depth + 1);
    }
    out.push('\n');
    indent(out, depth);
    out.push(']');
}

fn write_json_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::String(s) => write_json_string(out, s),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(v) => write_json_float(out, *v),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::OffsetDateTime(dt) => {
            let _ = write!(out, "\"{dt}\"");
        }
        Value::LocalDateTime(dt) => {
            let _ = write!(out, "\"{dt}\"");
        }
        Value::LocalDate(d) => {
            let _ = write!(out, "\"{d}\"");
        }
        Value::LocalTime(t) => {
            let _ = write!(out, "\"{t}\"");
        }
        Value::Array(a) => write_json_array(out, a, depth),
        Value::Table(t) => write_json_table(out, t, depth),
    }
}

fn write_json_float(out: &mut String, v: f64) {
    // JSON has no literals for the non-finite values; render them as strings.
    if v.is_nan() {
        out.push_str(if v.is_sign_negative() { "\"-nan\"" } else { "\"nan\"" });
    } else if v.is_infinite() {
        out.push_str(if v < 0.0 { "\"-inf\"" } else { "\"inf\"" });
    } else {
        let _ = write!(out, "{}", FloatRepr(v));
    }
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

// ---- TOML ---------------------------------------------------------------

pub(crate) fn to_toml(root: &Table) -> String {
    let mut out = String::new();
    write_toml_table(&mut out, root, &mut Vec::new());
    out
}

fn is_section(value: &Value) -> bool {
    match value {
        Value::Table(_) => true,
        Value::Array(a) => a.kind == ArrayKind::Tables,
        _ => false,
    }
}

fn write_toml_table(out: &mut String, table: &Table, path: &mut Vec<String>) {
    for (key, value) in table {
        if is_section(value) {
            continue;
        }
        write_key(out, &key.name);
        out.push_str(" = ");
        write_toml_value(out, value);
        out.push('\n');
    }
    for (key, value) in table {
        match value {
            Value::Table(t) => {
                path.push(key.name.clone());
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push('[');
                write_header_path(out, path);
                out.push_str("]\n");
                write_toml_table(out, t, path);
                path.pop();
            }
            Value::Array(a) if a.kind == ArrayKind::Tables => {
                path.push(key.name.clone());
                for element in a {
                    let Value::Table(t) = element else { continue };
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str("[[");
                    write_header_path(out, path);
                    out.push_str("]]\n");
                    write_toml_table(out, t, path);
                }
                path.pop();
            }
            _ => {}
        }
    }
}

fn write_header_path(out: &mut String, path: &[String]) {
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_key(out, segment);
    }
}

/// Writes a value in inline form, as it appears on the right of `=`.
fn write_toml_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_basic_string(out, s),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(v) => write_toml_float(out, *v),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::OffsetDateTime(dt) => {
            let _ = write!(out, "{dt}");
        }
        Value::LocalDateTime(dt) => {
            let _ = write!(out, "{dt}");
        }
        Value::LocalDate(d) => {
            let _ = write!(out, "{d}");
        }
        Value::LocalTime(t) => {
            let _ = write!(out, "{t}");
        }
        Value::Array(a) => {
            out.push('[');
            for (i, element) in a.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_toml_value(out, element);
            }
            out.push(']');
        }
        Value::Table(t) => {
            // Tables only render inline when nested inside a literal array;
            // table-valued entries become sections.
            out.push('{');
            for (i, (key, element)) in t.iter().enumerate() {
                out.push_str(if i == 0 { " " } else { ", " });
                write_key(out, &key.name);
                out.push_str(" = ");
                write_toml_value(out, element);
            }
            if !t.is_empty() {
                out.push(' ');
            }
            out.push('}');
        }
    }
}

fn write_toml_float(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str(if v.is_sign_negative() { "-nan" } else { "nan" });
    } else if v.is_infinite() {
        out.push_str(if v < 0.0 { "-inf" } else { "inf" });
    } else {
        let _ = write!(out, "{}", FloatRepr(v));
    }
}

/// Finite floats keep a fractional point so they re-parse as floats.
struct FloatRepr(f64);

impl std::fmt::Display for FloatRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == self.0.trunc() {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Writes a key segment: bare where possible, basic-quoted otherwise.
pub(crate) fn write_key(out: &mut String, name: &str) {
    let bare = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        out.push_str(name);
    } else {
        write_basic_string(out, name);
    }
}

fn write_basic_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
