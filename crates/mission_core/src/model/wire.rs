//! Lenient field decoders for REST API payloads.
//!
//! Upstream rows are loosely typed: scores arrive as numbers or numeric
//! strings and date columns occasionally carry non-string junk. A bad field
//! becomes `None` instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let score = value.and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    });
    Ok(score.filter(|score| score.is_finite()))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    })
}
