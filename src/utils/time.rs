//! Timestamp utilities: DB encoding, CLI parsing, minute arithmetic, local rendering.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};

/// Encode a timestamp the way every table stores it (RFC 3339, UTC, seconds).
/// The fixed shape keeps lexical order equal to chronological order in SQL.
pub fn to_db(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decode a stored timestamp.
pub fn from_db(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Parse a user-supplied instant: RFC 3339, or local "YYYY-MM-DD HH:MM[:SS]".
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| AppError::InvalidTime(s.to_string()));
        }
    }

    Err(AppError::InvalidTime(s.to_string()))
}

/// Whole minutes between two instants (truncated, never negative).
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}

pub fn local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// "HH:MM" or the grey placeholder for a missing end.
pub fn local_time_opt(ts: Option<DateTime<Utc>>) -> String {
    ts.map(local_time).unwrap_or_else(|| "--:--".to_string())
}
