//! Lenient deserializers for the wire boundary.
//!
//! Backend payloads vary across deployments: amounts arrive as numbers or
//! numeric strings, dates as plain dates or full timestamps, tags as arrays
//! or comma-joined strings. Everything downstream of the gateway sees only
//! the coerced forms; a value that cannot be coerced becomes `None` (or an
//! empty list) instead of failing the whole record.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON number or numeric string to `f64`; anything else is `None`.
pub(crate) fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|a| a.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    })
}

/// Coerce a date-ish string to a `NaiveDate`; anything else is `None`.
pub(crate) fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

/// Parse the date formats seen in the wild: `YYYY-MM-DD`, an ISO timestamp
/// starting with one, RFC 3339, or the RFC 2822 form some JSON layers emit
/// for raw datetimes.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Accept a list of strings or a single comma-joined string.
pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let s = s.trim().to_string();
                    (!s.is_empty()).then_some(s)
                }
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => split_tags(&s),
        _ => Vec::new(),
    })
}

/// Split a comma-joined tag string, dropping empty segments.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
