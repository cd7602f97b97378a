//! Lenient reading of `createdAt` values.
//!
//! Documents written by older versions hold full RFC 3339 timestamps, naive
//! `YYYY-MM-DDTHH:MM:SS` values, bare `YYYY-MM-DD` dates, or nothing at all.
//! Dates map to midnight UTC; a missing or null value maps to the Unix epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse(&raw).ok_or_else(|| {
            de::Error::custom(format!("invalid timestamp: {raw:?}"))
        }),
        None => Ok(DateTime::<Utc>::default()),
    }
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}
