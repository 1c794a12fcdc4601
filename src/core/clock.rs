//! The four clock transitions. Each one runs in a single write transaction:
//! status is resolved, the precondition checked, the rows written and the
//! status re-resolved before commit.

use crate::core::status::{StatusResolver, StatusSnapshot};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_break, close_shift, insert_break, insert_shift, last_break_end, last_clock_out,
};
use crate::errors::{AppError, AppResult};
use crate::models::action::ClockAction;
use crate::models::profile::Profile;
use crate::models::status::WorkStatus;
use crate::utils::clock::Clock;
use crate::utils::time::to_db;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::info;

/// What the caller is told after a successful action.
#[derive(Debug, Clone)]
pub struct ClockOutcome {
    pub action: ClockAction,
    pub at: DateTime<Utc>,
    pub shift_id: i64,
    pub break_id: Option<i64>,
    pub status: WorkStatus,
}

pub struct ClockLogic;

impl ClockLogic {
    pub fn clock_in(pool: &mut DbPool, user: &Profile, clock: &dyn Clock) -> AppResult<ClockOutcome> {
        Self::apply(pool, user, ClockAction::ClockIn, clock)
    }

    pub fn clock_out(pool: &mut DbPool, user: &Profile, clock: &dyn Clock) -> AppResult<ClockOutcome> {
        Self::apply(pool, user, ClockAction::ClockOut, clock)
    }

    pub fn start_break(pool: &mut DbPool, user: &Profile, clock: &dyn Clock) -> AppResult<ClockOutcome> {
        Self::apply(pool, user, ClockAction::StartBreak, clock)
    }

    pub fn end_break(pool: &mut DbPool, user: &Profile, clock: &dyn Clock) -> AppResult<ClockOutcome> {
        Self::apply(pool, user, ClockAction::EndBreak, clock)
    }

    pub fn apply(
        pool: &mut DbPool,
        user: &Profile,
        action: ClockAction,
        clock: &dyn Clock,
    ) -> AppResult<ClockOutcome> {
        let now = clock.now();
        let tx = pool.write_tx()?;

        let snap = StatusResolver::resolve(&tx, user.id)?;
        if !action.allowed_from(snap.status) {
            return Err(AppError::InvalidTransition {
                action,
                status: snap.status,
            });
        }

        let (shift_id, break_id) = match action {
            ClockAction::ClockIn => {
                if let Some(prev) = last_clock_out(&tx, user.id)? {
                    not_before(now, prev, "clock-in", "previous clock-out")?;
                }
                (insert_shift(&tx, user.id, now)?, None)
            }

            ClockAction::ClockOut => {
                let shift_id = open_shift_checked(&tx, &snap, now)?;
                // The break closes at the same instant as the shift.
                let closed = match &snap.open_break {
                    Some(b) => {
                        not_before(now, b.break_start, "clock-out", "break start")?;
                        close_break(&tx, b.id, now)?;
                        Some(b.id)
                    }
                    None => None,
                };
                close_shift(&tx, shift_id, now)?;
                (shift_id, closed)
            }

            ClockAction::StartBreak => {
                let shift_id = open_shift_checked(&tx, &snap, now)?;
                (shift_id, Some(insert_break(&tx, shift_id, now)?))
            }

            ClockAction::EndBreak => {
                let shift_id = open_shift_checked(&tx, &snap, now)?;
                let b = snap
                    .open_break
                    .as_ref()
                    .ok_or_else(|| AppError::Other("on break without an open break row".into()))?;
                not_before(now, b.break_start, "break end", "break start")?;
                close_break(&tx, b.id, now)?;
                (shift_id, Some(b.id))
            }
        };

        ttlog(
            &tx,
            action.as_str(),
            &user.email,
            &format!("shift #{shift_id} at {}", to_db(now)),
        )?;

        let after = StatusResolver::resolve(&tx, user.id)?;
        tx.commit()?;

        info!(
            user_id = user.id,
            action = action.as_str(),
            shift_id,
            status = after.status.as_str(),
            "clock action applied"
        );

        Ok(ClockOutcome {
            action,
            at: now,
            shift_id,
            break_id,
            status: after.status,
        })
    }
}

/// Id of the open shift, after checking `now` precedes neither its clock-in
/// nor the end of any break already taken in it.
fn open_shift_checked(
    conn: &Connection,
    snap: &StatusSnapshot,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    let shift = snap
        .shift
        .as_ref()
        .ok_or_else(|| AppError::Other("clocked in without an open shift row".into()))?;
    not_before(now, shift.clock_in, "this action", "clock-in")?;
    if let Some(end) = last_break_end(conn, shift.id)? {
        not_before(now, end, "this action", "end of the last break")?;
    }
    Ok(shift.id)
}

fn not_before(
    now: DateTime<Utc>,
    earlier: DateTime<Utc>,
    what: &str,
    reference: &str,
) -> AppResult<()> {
    if now < earlier {
        return Err(AppError::InvalidTime(format!(
            "{what} at {} is before the {reference} at {}",
            to_db(now),
            to_db(earlier)
        )));
    }
    Ok(())
}
