// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Wire parameter encoding.
//!
//! Every parameterized endpoint declares a closed whitelist of the wire
//! parameter names it recognizes, each tagged with how its value is
//! serialized. Names are the wire names verbatim: hyphenated, with a
//! trailing `?` on boolean-style flags (`with-ops?`). A name outside the
//! whitelist fails before any request is made.

use serde_json::Value;

use crate::edn;
use crate::error::{Error, Result};

/// How a parameter value is rendered onto the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    /// Pass through: strings unquoted, other scalars in their JSON form.
    Raw,
    /// Compact JSON text.
    Json,
    /// EDN text.
    Edn,
}

/// One recognized wire parameter of an endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub format: ParamFormat,
}

impl ParamSpec {
    pub const fn raw(name: &'static str) -> Self {
        Self {
            name,
            format: ParamFormat::Raw,
        }
    }

    pub const fn json(name: &'static str) -> Self {
        Self {
            name,
            format: ParamFormat::Json,
        }
    }

    pub const fn edn(name: &'static str) -> Self {
        Self {
            name,
            format: ParamFormat::Edn,
        }
    }
}

/// Encodes caller-provided parameters against an endpoint whitelist.
///
/// Names must be members of `known`; a `Value::Null` is dropped entirely
/// rather than sent empty. Output preserves the caller's order. Pure: no
/// request is made and no caller state is touched.
pub fn encode(known: &[ParamSpec], provided: &[(&str, Value)]) -> Result<Vec<(String, String)>> {
    let mut params = Vec::with_capacity(provided.len());
    for (name, value) in provided {
        let spec = known
            .iter()
            .find(|spec| spec.name == *name)
            .ok_or_else(|| Error::UnknownParameter((*name).to_string()))?;
        if value.is_null() {
            continue;
        }
        let rendered = match spec.format {
            ParamFormat::Raw => raw_value(value),
            ParamFormat::Json => value.to_string(),
            ParamFormat::Edn => edn::to_edn(value),
        };
        params.push((spec.name.to_string(), rendered));
    }
    Ok(params)
}

fn raw_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::raw("tx-id"),
        ParamSpec::raw("with-ops?"),
        ParamSpec::json("eid-json"),
        ParamSpec::edn("eid-edn"),
    ];

    #[test]
    fn unknown_name_is_rejected() {
        let err = encode(SPECS, &[("bogus-field", json!(1))]).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter(name) if name == "bogus-field"));
    }

    #[test]
    fn null_values_are_dropped() {
        let params = encode(SPECS, &[("tx-id", Value::Null), ("with-ops?", json!(true))]).unwrap();
        assert_eq!(params, vec![("with-ops?".to_string(), "true".to_string())]);
    }

    #[test]
    fn raw_strings_pass_through_unquoted() {
        let params = encode(SPECS, &[("tx-id", json!("8")), ("with-ops?", json!(false))]).unwrap();
        assert_eq!(
            params,
            vec![
                ("tx-id".to_string(), "8".to_string()),
                ("with-ops?".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn format_dispatch_follows_the_declared_tag() {
        let params = encode(
            SPECS,
            &[("eid-json", json!("ivan")), ("eid-edn", json!(["a", 1]))],
        )
        .unwrap();
        assert_eq!(
            params,
            vec![
                ("eid-json".to_string(), "\"ivan\"".to_string()),
                ("eid-edn".to_string(), "[\"a\" 1]".to_string()),
            ]
        );
    }

    #[test]
    fn caller_order_is_preserved() {
        let params = encode(
            SPECS,
            &[("with-ops?", json!(true)), ("tx-id", json!(3))],
        )
        .unwrap();
        let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["with-ops?", "tx-id"]);
    }
}
