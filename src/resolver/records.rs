// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Conversion between flat records and the structured resolution tree
//!
//! Flat records are the source of truth. The resolution tree is a derived
//! view covering only currency-address keys; custom keys live in records
//! and are never promoted.

use std::collections::BTreeMap;

use serde_json::{json, Value};

/// The record key a currency's address lives under.
pub fn currency_key(currency: &str) -> String {
    format!("crypto.{}.address", currency.to_uppercase())
}

/// Expand flat currency-address records into the nested resolution tree:
/// `crypto.BTC.address` becomes `{"crypto": {"BTC": {"address": ...}}}`.
pub fn records_to_resolution(records: &BTreeMap<String, String>, currencies: &[String]) -> Value {
    let mut resolution = json!({});
    for currency in currencies {
        let key = currency_key(currency);
        if let Some(value) = records.get(&key) {
            set_path(&mut resolution, &key, value);
        }
    }
    resolution
}

/// Flatten a resolution tree back into currency-address records. Entries
/// outside the currency set are ignored here; [`custom_entries`] reports
/// them.
pub fn resolution_to_records(resolution: &Value, currencies: &[String]) -> BTreeMap<String, String> {
    currencies
        .iter()
        .filter_map(|currency| {
            let key = currency_key(currency);
            get_path(resolution, &key).map(|value| (key, value))
        })
        .collect()
}

/// Dotted paths present in `resolution` that are not currency-address
/// entries. Used to reject unsupported content before deployment.
pub fn custom_entries(resolution: &Value, currencies: &[String]) -> Vec<String> {
    let known: Vec<String> = currencies.iter().map(|c| currency_key(c)).collect();
    let mut leaves = Vec::new();
    collect_leaves(resolution, String::new(), &mut leaves);
    leaves
        .into_iter()
        .filter(|path| !known.contains(path))
        .collect()
}

fn collect_leaves(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_leaves(child, path, out);
            }
        }
        Value::Null => {}
        _ => out.push(prefix),
    }
}

fn set_path(root: &mut Value, path: &str, value: &str) {
    let mut cursor = root;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            cursor[part] = Value::String(value.to_string());
        } else {
            if !cursor.get(part).map_or(false, Value::is_object) {
                cursor[part] = json!({});
            }
            cursor = &mut cursor[part];
        }
    }
}

fn get_path(root: &Value, path: &str) -> Option<String> {
    let mut cursor = root;
    for part in path.split('.') {
        cursor = cursor.get(part)?;
    }
    cursor.as_str().map(str::to_string)
}
