//! Forgiving field deserializers for model-generated report JSON.
//!
//! The model is asked for a fixed schema but regularly answers with numbers
//! where text is expected, arrays where a sentence is expected, or `null`.
//! These helpers coerce instead of failing so a single odd field never throws
//! away an otherwise usable section.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::foundation::NOT_SPECIFIED;

pub(crate) fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// Renders any JSON value as display text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::String(_) | Value::Null => not_specified(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(value_to_text)
                .filter(|s| s != NOT_SPECIFIED)
                .collect();
            if parts.is_empty() {
                not_specified()
            } else {
                parts.join("; ")
            }
        }
        Value::Object(_) => value.to_string(),
    }
}

/// Reads a count such as `15`, `15.0` or `"15 countries"`.
pub fn value_to_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f.round().min(u32::MAX as f64) as u32)
            .unwrap_or(0),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == ',')
                .filter(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_to_text(&other)),
    })
}

/// A list of strings; a lone string becomes a one-element list.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| s != NOT_SPECIFIED)
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_count(&value))
}

/// A list of records; elements that do not fit the record shape are dropped.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, value_to_text(&v)))
            .collect(),
        _ => BTreeMap::new(),
    })
}
