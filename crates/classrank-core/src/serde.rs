//! Lenient deserializers for persisted records.
//!
//! Older data files carry loosely typed values (string marks, `null`
//! references). These helpers coerce them into well-typed defaults so the
//! rest of the code never needs existence checks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Scalar values as text; `null`, arrays and objects have no text form.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize a string field that older files may hold as a number.
///
/// Numbers and booleans keep their text form; anything else becomes
/// `T::default()`.
pub fn lenient_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).map(T::from).unwrap_or_default())
}

/// Deserialize an optional string where empty or `null` means absent.
/// Numeric references are kept as their text form.
pub fn deserialize_optional_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Value::deserialize(deserializer)?;
    match scalar_to_string(value) {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(T::from(s))),
        None => Ok(None),
    }
}

/// Deserialize a list of strings. A non-array becomes empty and
/// non-scalar elements are dropped.
pub fn lenient_string_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(scalar_to_string)
            .map(T::from)
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Deserialize a boolean flag where `null` or a non-boolean falls back to `true`.
pub fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        _ => Ok(true),
    }
}

/// Coerce an arbitrary JSON value into a mark; anything unusable becomes 0.
pub fn coerce_mark(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).unwrap_or(0)
            } else if let Some(v) = n.as_f64() {
                if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) {
                    v.trunc() as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

/// Deserialize a subject -> mark mapping, coercing each value with [`coerce_mark`].
/// Anything other than an object reads as no marks.
pub fn deserialize_lenient_marks<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .map(|(subject, value)| {
                let mark = coerce_mark(&value);
                (subject, mark)
            })
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}

/// Deserialize a keyed collection of records.
///
/// A non-object reads as empty, and an entry that cannot be read as `V`
/// is skipped so one damaged record does not discard its neighbours.
pub fn deserialize_lenient_map<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: From<String> + Ord,
    V: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(key, value)| {
                serde_json::from_value(value)
                    .ok()
                    .map(|record| (K::from(key), record))
            })
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}
