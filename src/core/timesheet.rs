//! Timesheet aggregation: worked time per shift (span minus breaks) and
//! totals per user, for the signed-in user or, for admins, everyone.

use crate::db::queries::{find_profile, list_profiles, load_breaks_for_shifts, load_shifts};
use crate::errors::{AppError, AppResult};
use crate::models::breaks::Break;
use crate::models::profile::Profile;
use crate::models::shift::Shift;
use crate::utils::date::{DateBounds, utc_window};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

/// Whose shifts a timesheet covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The signed-in user.
    Own,
    /// One user by id or email (admins, or the signed-in user themself).
    User(String),
    /// Every user (admins only).
    All,
}

impl Scope {
    pub fn from_flags(all: bool, user: Option<&str>) -> Self {
        match (all, user) {
            (true, _) => Scope::All,
            (false, Some(who)) => Scope::User(who.to_string()),
            (false, None) => Scope::Own,
        }
    }
}

/// Durations of one shift, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftDurations {
    pub span_minutes: i64,
    pub break_minutes: i64,
    pub worked_minutes: i64,
}

/// Open shifts and open breaks count up to `now`.
pub fn shift_durations(shift: &Shift, breaks: &[Break], now: DateTime<Utc>) -> ShiftDurations {
    let span_minutes = shift.span_minutes(now);
    let break_minutes: i64 = breaks.iter().map(|b| b.minutes(now)).sum();
    ShiftDurations {
        span_minutes,
        break_minutes,
        worked_minutes: (span_minutes - break_minutes).max(0),
    }
}

#[derive(Debug, Clone)]
pub struct ShiftLine {
    pub shift: Shift,
    pub employee: String,
    pub email: String,
    pub breaks: Vec<Break>,
    pub durations: ShiftDurations,
}

impl ShiftLine {
    pub fn is_open(&self) -> bool {
        self.shift.is_open()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTotals {
    pub user_id: i64,
    pub employee: String,
    pub email: String,
    pub shifts: usize,
    pub break_minutes: i64,
    pub worked_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct Timesheet {
    pub bounds: DateBounds,
    pub lines: Vec<ShiftLine>,
    pub totals: Vec<UserTotals>,
}

impl Timesheet {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_worked_minutes(&self) -> i64 {
        self.totals.iter().map(|t| t.worked_minutes).sum()
    }
}

pub struct TimesheetLogic;

impl TimesheetLogic {
    /// Build the timesheet `viewer` is allowed to see for `scope` and `bounds`.
    pub fn build(
        conn: &Connection,
        viewer: &Profile,
        scope: &Scope,
        bounds: DateBounds,
        now: DateTime<Utc>,
    ) -> AppResult<Timesheet> {
        let user_filter = Self::resolve_scope(conn, viewer, scope)?;

        let window = match bounds {
            Some((from, to)) => Some(utc_window(from, to)?),
            None => None,
        };

        let shifts = load_shifts(conn, user_filter, window)?;
        let mut breaks = load_breaks_for_shifts(conn, user_filter, window)?;

        let profiles: HashMap<i64, Profile> = list_profiles(conn)?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut lines = Vec::with_capacity(shifts.len());
        for shift in shifts {
            let shift_breaks = breaks.remove(&shift.id).unwrap_or_default();
            let durations = shift_durations(&shift, &shift_breaks, now);
            let (employee, email) = match profiles.get(&shift.user_id) {
                Some(p) => (p.display_name().to_string(), p.email.clone()),
                None => (format!("#{}", shift.user_id), String::new()),
            };
            lines.push(ShiftLine {
                shift,
                employee,
                email,
                breaks: shift_breaks,
                durations,
            });
        }

        let totals = aggregate(&lines);
        Ok(Timesheet {
            bounds,
            lines,
            totals,
        })
    }

    /// `None` means all users.
    fn resolve_scope(conn: &Connection, viewer: &Profile, scope: &Scope) -> AppResult<Option<i64>> {
        match scope {
            Scope::Own => Ok(Some(viewer.id)),
            Scope::All => {
                if !viewer.role.is_admin() {
                    return Err(AppError::Forbidden(
                        "only admins can view every user's timesheet".into(),
                    ));
                }
                Ok(None)
            }
            Scope::User(who) => {
                let target =
                    find_profile(conn, who)?.ok_or_else(|| AppError::UnknownUser(who.clone()))?;
                if target.id != viewer.id && !viewer.role.is_admin() {
                    return Err(AppError::Forbidden(format!(
                        "only admins can view the timesheet of {}",
                        target.email
                    )));
                }
                Ok(Some(target.id))
            }
        }
    }
}

/// Per-user totals, ordered by user id.
pub fn aggregate(lines: &[ShiftLine]) -> Vec<UserTotals> {
    let mut by_user: BTreeMap<i64, UserTotals> = BTreeMap::new();

    for line in lines {
        let entry = by_user
            .entry(line.shift.user_id)
            .or_insert_with(|| UserTotals {
                user_id: line.shift.user_id,
                employee: line.employee.clone(),
                email: line.email.clone(),
                shifts: 0,
                break_minutes: 0,
                worked_minutes: 0,
            });
        entry.shifts += 1;
        entry.break_minutes += line.durations.break_minutes;
        entry.worked_minutes += line.durations.worked_minutes;
    }

    by_user.into_values().collect()
}
