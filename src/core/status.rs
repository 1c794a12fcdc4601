//! Derives the current work status of a user from the open rows.

use crate::db::queries::{find_open_break, find_open_shift};
use crate::errors::AppResult;
use crate::models::breaks::Break;
use crate::models::shift::Shift;
use crate::models::status::WorkStatus;
use rusqlite::Connection;
use tracing::debug;

/// Status plus the open rows it was derived from.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub status: WorkStatus,
    pub shift: Option<Shift>,
    pub open_break: Option<Break>,
}

pub struct StatusResolver;

impl StatusResolver {
    /// No open shift → `clocked_out`; open shift with an open break →
    /// `on_break`; otherwise `working`. Read-only.
    pub fn resolve(conn: &Connection, user_id: i64) -> AppResult<StatusSnapshot> {
        let Some(shift) = find_open_shift(conn, user_id)? else {
            debug!(user_id, "no open shift");
            return Ok(StatusSnapshot {
                status: WorkStatus::ClockedOut,
                shift: None,
                open_break: None,
            });
        };

        let open_break = find_open_break(conn, shift.id)?;
        let status = if open_break.is_some() {
            WorkStatus::OnBreak
        } else {
            WorkStatus::Working
        };

        debug!(user_id, shift_id = shift.id, status = status.as_str(), "status resolved");
        Ok(StatusSnapshot {
            status,
            shift: Some(shift),
            open_break,
        })
    }
}
