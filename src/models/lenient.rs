//! Field deserializers that accept the shapes different export versions use.
//!
//! Snowflake ids and type tags show up as strings in some packages and as
//! numbers in others; both decode to the same `String`. Exports also write
//! `null` for fields they have no value for, which reads as the default.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn scalar_to_string<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a string or number, found {other}"))),
    }
}

/// String, number or bool as `String`; `null` becomes empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_to_string(Value::deserialize(deserializer)?).map(Option::unwrap_or_default)
}

/// Like [`string`] but keeps `null` as `None`.
pub fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    scalar_to_string(Value::deserialize(deserializer)?)
}

/// Any `T`, with `null` read as `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
