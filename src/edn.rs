// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! EDN text emission for JSON values.
//!
//! The query side of the wire speaks EDN. This walks a [`serde_json::Value`]
//! and writes the equivalent EDN text: `null` becomes `nil`, arrays become
//! vectors, and object keys stay strings. Richer EDN primitives (keywords,
//! symbols) have no JSON counterpart; callers that need them pass
//! pre-rendered text through a raw parameter instead.

use serde_json::Value;

pub fn to_edn(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("nil"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_string(out, key);
                out.push(' ');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(to_edn(&Value::Null), "nil");
        assert_eq!(to_edn(&json!(true)), "true");
        assert_eq!(to_edn(&json!(false)), "false");
        assert_eq!(to_edn(&json!(42)), "42");
        assert_eq!(to_edn(&json!(-7.5)), "-7.5");
        assert_eq!(to_edn(&json!("ivan")), "\"ivan\"");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(to_edn(&json!("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(to_edn(&json!("a\\b")), "\"a\\\\b\"");
        assert_eq!(to_edn(&json!("line\nbreak")), "\"line\\nbreak\"");
    }

    #[test]
    fn vectors_are_space_separated() {
        assert_eq!(to_edn(&json!([1, "two", null])), "[1 \"two\" nil]");
        assert_eq!(to_edn(&json!([])), "[]");
    }

    #[test]
    fn maps_keep_string_keys() {
        // serde_json maps iterate in key order
        assert_eq!(
            to_edn(&json!({"xt/id": "ivan", "age": 30})),
            "{\"age\" 30, \"xt/id\" \"ivan\"}"
        );
    }

    #[test]
    fn nested_structures() {
        assert_eq!(
            to_edn(&json!({"ids": [1, 2], "meta": {"ok": true}})),
            "{\"ids\" [1 2], \"meta\" {\"ok\" true}}"
        );
    }
}
