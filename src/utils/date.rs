//! Date ranges for timesheet and export selection.
//!
//! Accepted shapes:
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
//! - `A:B` where both sides share one of the shapes above
//! - `all` (no bounds)

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Inclusive local-date bounds; `None` means every date.
pub type DateBounds = Option<(NaiveDate, NaiveDate)>;

/// Resolve the `--range` argument. Without one, the month containing `today`.
pub fn resolve_range(range: Option<&str>, today: NaiveDate) -> AppResult<DateBounds> {
    match range {
        None => Ok(Some(month_bounds(today.year(), today.month())?)),
        Some(r) if r.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => parse_range(r).map(Some),
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(r.to_string());

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r} (start and end must have the same format)"
            )));
        }

        let (d1, _) = period_bounds(start).ok_or_else(invalid)?;
        let (_, d2) = period_bounds(end).ok_or_else(invalid)?;

        if d2 < d1 {
            return Err(AppError::InvalidDate(format!("{r} (end before start)")));
        }
        return Ok((d1, d2));
    }

    period_bounds(r.trim()).ok_or_else(invalid)
}

/// First and last day of a single `YYYY` / `YYYY-MM` / `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let (y, m) = p.split_once('-')?;
            month_bounds(y.parse().ok()?, m.parse().ok()?).ok()
        }
        10 => {
            let d = parse_date(p)?;
            Some((d, d))
        }
        _ => None,
    }
}

fn month_bounds(y: i32, m: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(format!("{y:04}-{m:02}"));
    let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// Convert inclusive local dates into a half-open UTC interval [start, end).
pub fn utc_window(from: NaiveDate, to: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let after = to
        .succ_opt()
        .ok_or_else(|| AppError::InvalidDate(to.to_string()))?;
    Ok((local_midnight(from)?, local_midnight(after)?))
}

fn local_midnight(d: NaiveDate) -> AppResult<DateTime<Utc>> {
    d.and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDate(d.to_string()))
}

/// Title for reports, e.g. "September 2025" or "2025-09-01 → 2025-09-15".
pub fn describe_range(bounds: &DateBounds) -> String {
    match bounds {
        None => "all dates".to_string(),
        Some((a, b)) if a == b => a.to_string(),
        Some((a, b)) => {
            let whole_month = a.day() == 1
                && a.year() == b.year()
                && a.month() == b.month()
                && b.succ_opt().is_some_and(|n| n.month() != b.month());
            if whole_month {
                a.format("%B %Y").to_string()
            } else {
                format!("{a} → {b}")
            }
        }
    }
}
