// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Value normalization between host values and the contract wire shape

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One typed argument as the contract execution layer expects it: the
/// parameter name, its declared type, and the normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireValue {
    pub vname: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub value: Value,
}

/// Type families the encoder keys on. Anything unrecognized falls back to
/// shape-driven normalization; the ledger stays the final validator.
enum TypeFamily {
    Bool,
    Numeric,
    HexBytes,
    Text,
    Assoc,
    Other,
}

fn family(declared: &str) -> TypeFamily {
    match declared {
        "Bool" => TypeFamily::Bool,
        "String" => TypeFamily::Text,
        "BNum" => TypeFamily::Numeric,
        t if t.starts_with("Uint") || t.starts_with("Int") => TypeFamily::Numeric,
        t if t.starts_with("ByStr") => TypeFamily::HexBytes,
        t if t.starts_with("Map") => TypeFamily::Assoc,
        _ => TypeFamily::Other,
    }
}

/// Encode a host value for a parameter slot of the given declared type.
///
/// The declared type picks the encoding; a value whose shape does not fit
/// is handed to [`normalize`] instead of being rejected, since strict type
/// checking belongs to the execution boundary, not the client.
pub fn encode(declared: &str, value: &Value) -> Value {
    match (family(declared), value) {
        (TypeFamily::Bool, Value::Bool(b)) => bool_variant(*b),
        (TypeFamily::Bool, v) if is_variant_shaped(v) => v.clone(),
        (TypeFamily::Numeric, Value::Number(n)) => Value::String(n.to_string()),
        (TypeFamily::Numeric, Value::String(s)) => Value::String(s.clone()),
        (TypeFamily::HexBytes, Value::String(s)) => normalize_text(s),
        (TypeFamily::Text, Value::String(s)) => normalize_text(s),
        (TypeFamily::Assoc, Value::Object(map)) => assoc(map),
        (TypeFamily::Assoc, Value::Array(_)) => value.clone(),
        (TypeFamily::Other, v) => normalize(v),
        _ => {
            tracing::debug!("value shape does not fit declared type {}", declared);
            normalize(value)
        }
    }
}

/// Shape-driven normalization, applied when the declared type gives no
/// better answer. Permissive on purpose: nothing is rejected here.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => bool_variant(*b),
        Value::Array(_) => value.clone(),
        Value::Object(_) if is_variant_shaped(value) => value.clone(),
        Value::Object(map) => assoc(map),
        Value::String(s) => normalize_text(s),
        Value::Null => Value::Null,
    }
}

/// Booleans are not primitive on the wire: they are nullary constructors of
/// a two-variant sum type.
fn bool_variant(value: bool) -> Value {
    json!({
        "constructor": if value { "True" } else { "False" },
        "argtypes": [],
        "arguments": [],
    })
}

/// An object already shaped like a tagged variant passes through untouched.
fn is_variant_shaped(value: &Value) -> bool {
    value.get("constructor").map_or(false, Value::is_string)
        && value.get("argtypes").map_or(false, Value::is_array)
        && value.get("arguments").map_or(false, Value::is_array)
}

/// Key/value mappings travel as ordered association lists; the remote store
/// is a true map, so the order carries no meaning.
fn assoc(map: &Map<String, Value>) -> Value {
    Value::Array(
        map.iter()
            .map(|(key, val)| json!({ "key": key, "val": val }))
            .collect(),
    )
}

fn normalize_text(s: &str) -> Value {
    let hex_literal = Regex::new(r"^0[xX][0-9a-fA-F]+$").expect("invalid regex");
    if hex_literal.is_match(s) {
        Value::String(s.to_lowercase())
    } else {
        Value::String(s.to_string())
    }
}

/// Read an association-list state value back out as key/value pairs.
/// Entries without the expected shape are skipped.
pub fn decode_assoc(value: &Value) -> Vec<(String, Value)> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let key = entry.get("key")?.as_str()?.to_string();
                    let val = entry.get("val")?.clone();
                    Some((key, val))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Read a boolean variant back out; anything not shaped like `True` reads
/// as false.
pub fn decode_bool(value: &Value) -> bool {
    value.get("constructor").and_then(Value::as_str) == Some("True")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_become_decimal_strings() {
        assert_eq!(encode("Uint128", &json!(25000)), json!("25000"));
        assert_eq!(encode("BNum", &json!(0)), json!("0"));
        assert_eq!(encode("Uint128", &json!("42")), json!("42"));
    }

    #[test]
    fn test_booleans_become_variants() {
        assert_eq!(
            encode("Bool", &json!(true)),
            json!({"constructor": "True", "argtypes": [], "arguments": []})
        );
        assert_eq!(
            encode("Bool", &json!(false)),
            json!({"constructor": "False", "argtypes": [], "arguments": []})
        );
    }

    #[test]
    fn test_variant_shaped_objects_pass_through() {
        let variant = json!({"constructor": "True", "argtypes": [], "arguments": []});
        assert_eq!(encode("Bool", &variant), variant);
        assert_eq!(normalize(&variant), variant);
    }

    #[test]
    fn test_hex_strings_lowercased() {
        assert_eq!(encode("ByStr20", &json!("0xABCDEF")), json!("0xabcdef"));
        assert_eq!(encode("String", &json!("0x7357")), json!("0x7357"));
        assert_eq!(encode("String", &json!("plain text")), json!("plain text"));
    }

    #[test]
    fn test_maps_become_assoc_lists() {
        let encoded = encode("Map String String", &json!({"a": "1", "b": "2"}));
        assert_eq!(
            encoded,
            json!([{"key": "a", "val": "1"}, {"key": "b", "val": "2"}])
        );
    }

    #[test]
    fn test_arrays_pass_through() {
        let wire = json!([{"key": "a", "val": "1"}]);
        assert_eq!(normalize(&wire), wire);
        assert_eq!(encode("Map String String", &wire), wire);
    }

    #[test]
    fn test_mismatched_shape_falls_back() {
        // a boolean supplied for a numeric slot still encodes as a variant
        assert_eq!(
            encode("Uint32", &json!(true)),
            json!({"constructor": "True", "argtypes": [], "arguments": []})
        );
    }

    #[test]
    fn test_assoc_round_trip() {
        let encoded = encode("Map String String", &json!({"x": "1", "y": "2"}));
        let decoded = decode_assoc(&encoded);
        assert_eq!(
            decoded,
            vec![
                ("x".to_string(), json!("1")),
                ("y".to_string(), json!("2"))
            ]
        );
    }

    #[test]
    fn test_decode_bool() {
        assert!(decode_bool(&json!({"constructor": "True", "argtypes": [], "arguments": []})));
        assert!(!decode_bool(&json!({"constructor": "False", "argtypes": [], "arguments": []})));
        assert!(!decode_bool(&json!("True")));
    }
}
