//! Defensive field extraction from raw provider payloads.
//!
//! Providers disagree on whether numbers arrive as JSON numbers or strings,
//! and suspended quotes are reported as `"-"`. Only the envelope helpers
//! fail; field readers return `None` so normalizers can drop or default per
//! field.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::FeedError;
use crate::models::ProviderId;

const SUMMARY_MAX_CHARS: usize = 200;
const CHARS_PER_MINUTE: usize = 1000;
const DEFAULT_READ_TIME: u32 = 2;

/// Unwrap the `{"status": "success", "data": [...]}` envelope used by the
/// self-hosted market backends.
pub(crate) fn success_data(raw: &Value, provider: ProviderId) -> Result<&[Value], FeedError> {
    let status = raw.get("status").and_then(Value::as_str);
    if status != Some("success") {
        return Err(FeedError::malformed(
            provider,
            format!("unexpected status {:?}", status.unwrap_or("<missing>")),
        ));
    }
    raw.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| FeedError::malformed(provider, "data is not an array"))
}

/// Named array field of a payload, e.g. `stocks` or `sectors`.
pub(crate) fn array_field<'a>(
    raw: &'a Value,
    field: &str,
    provider: ProviderId,
) -> Result<&'a [Value], FeedError> {
    raw.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| FeedError::malformed(provider, format!("{} is not an array", field)))
}

/// Parse a decimal from a JSON number or numeric string.
pub(crate) fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() || raw == "-" {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// First field among `keys` that holds a usable decimal.
pub(crate) fn decimal_at(row: &Value, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| row.get(*key).and_then(decimal))
}

/// First field among `keys` that holds non-blank text. Numbers are
/// accepted and rendered as text, since codes sometimes arrive unquoted.
pub(crate) fn text_at(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match row.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First field among `keys` that holds a non-negative whole quantity.
pub(crate) fn unsigned_at(row: &Value, keys: &[&str]) -> Option<u64> {
    decimal_at(row, keys)
        .filter(|d| !d.is_sign_negative())
        .and_then(|d| d.trunc().to_u64())
}

pub(crate) fn count_at(row: &Value, keys: &[&str]) -> Option<u32> {
    unsigned_at(row, keys).and_then(|n| u32::try_from(n).ok())
}

/// Convert a minor-unit price (cents) to major units.
pub(crate) fn from_minor_units(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Cut `text` to at most `SUMMARY_MAX_CHARS` characters.
pub(crate) fn summary(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(SUMMARY_MAX_CHARS).collect())
}

/// Estimated minutes to read `content`; two minutes when there is none.
pub(crate) fn read_time(content: Option<&str>) -> u32 {
    match content.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => {
            let chars = c.chars().count();
            u32::try_from(chars.div_ceil(CHARS_PER_MINUTE)).unwrap_or(u32::MAX)
        }
        None => DEFAULT_READ_TIME,
    }
}

/// Parse a provider timestamp, falling back to `fallback` when it is
/// missing or unreadable.
pub(crate) fn timestamp(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_timestamp)
        .unwrap_or(fallback)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Naive values are taken as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
