use crate::errors::{AppError, AppResult};
use crate::models::breaks::Break;
use crate::models::profile::Profile;
use crate::models::role::Role;
use crate::models::session::Session;
use crate::models::shift::Shift;
use crate::utils::time::{from_db, to_db};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};
use std::collections::HashMap;

// ------------------------------------------------------------------
// Row mapping
// ------------------------------------------------------------------

/// Conversion error pointing at the column `col` of `row`.
fn conversion_failure(row: &Row, col: &str, err: AppError) -> rusqlite::Error {
    match row.as_ref().column_index(col) {
        Ok(idx) => rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)),
        Err(e) => e,
    }
}

fn get_ts(row: &Row, col: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    from_db(&raw).map_err(|e| conversion_failure(row, col, e))
}

fn get_ts_opt(row: &Row, col: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| from_db(&s).map_err(|e| conversion_failure(row, col, e)))
        .transpose()
}

pub fn map_profile(row: &Row) -> Result<Profile> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        conversion_failure(row, "role", AppError::InvalidRole(role_str.clone()))
    })?;

    Ok(Profile {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn map_shift(row: &Row) -> Result<Shift> {
    Ok(Shift {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        clock_in: get_ts(row, "clock_in")?,
        clock_out: get_ts_opt(row, "clock_out")?,
    })
}

pub fn map_break(row: &Row) -> Result<Break> {
    Ok(Break {
        id: row.get("id")?,
        shift_id: row.get("shift_id")?,
        break_start: get_ts(row, "break_start")?,
        break_end: get_ts_opt(row, "break_end")?,
    })
}

fn map_session(row: &Row) -> Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        started_at: get_ts(row, "started_at")?,
        ended_at: get_ts_opt(row, "ended_at")?,
    })
}

// ------------------------------------------------------------------
// Profiles
// ------------------------------------------------------------------

pub fn insert_profile(
    conn: &Connection,
    full_name: &str,
    email: &str,
    role: Role,
    created_at: DateTime<Utc>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO profiles (full_name, email, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![full_name, email, role.to_db_str(), to_db(created_at)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_profile_by_id(conn: &Connection, id: i64) -> AppResult<Option<Profile>> {
    Ok(conn
        .query_row("SELECT * FROM profiles WHERE id = ?1", [id], map_profile)
        .optional()?)
}

pub fn find_profile_by_email(conn: &Connection, email: &str) -> AppResult<Option<Profile>> {
    Ok(conn
        .query_row(
            "SELECT * FROM profiles WHERE email = ?1",
            [email.trim()],
            map_profile,
        )
        .optional()?)
}

/// Look a profile up by numeric id or by email.
pub fn find_profile(conn: &Connection, who: &str) -> AppResult<Option<Profile>> {
    match who.trim().parse::<i64>() {
        Ok(id) => find_profile_by_id(conn, id),
        Err(_) => find_profile_by_email(conn, who),
    }
}

pub fn list_profiles(conn: &Connection) -> AppResult<Vec<Profile>> {
    let mut stmt = conn.prepare("SELECT * FROM profiles ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_profile)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_profiles(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?)
}

// ------------------------------------------------------------------
// Shifts
// ------------------------------------------------------------------

/// The user's open shift (`clock_out IS NULL`), if any.
pub fn find_open_shift(conn: &Connection, user_id: i64) -> AppResult<Option<Shift>> {
    Ok(conn
        .query_row(
            "SELECT * FROM shifts WHERE user_id = ?1 AND clock_out IS NULL",
            [user_id],
            map_shift,
        )
        .optional()?)
}

pub fn insert_shift(conn: &Connection, user_id: i64, clock_in: DateTime<Utc>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO shifts (user_id, clock_in) VALUES (?1, ?2)",
        params![user_id, to_db(clock_in)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_shift(conn: &Connection, shift_id: i64, clock_out: DateTime<Utc>) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE shifts SET clock_out = ?1 WHERE id = ?2 AND clock_out IS NULL",
        params![to_db(clock_out), shift_id],
    )?;
    if changed != 1 {
        return Err(AppError::Other(format!("shift {shift_id} is not open")));
    }
    Ok(())
}

/// Latest `clock_out` among the user's closed shifts.
pub fn last_clock_out(conn: &Connection, user_id: i64) -> AppResult<Option<DateTime<Utc>>> {
    let raw: Option<String> = conn.query_row(
        "SELECT MAX(clock_out) FROM shifts WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    raw.as_deref().map(from_db).transpose()
}

/// Append the user/window conditions on the shifts aliased `s`.
fn push_shift_filters(
    sql: &mut String,
    args: &mut Vec<Box<dyn ToSql>>,
    user_id: Option<i64>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) {
    if let Some(uid) = user_id {
        sql.push_str(" AND s.user_id = ?");
        args.push(Box::new(uid));
    }
    if let Some((from, to)) = window {
        sql.push_str(" AND s.clock_in >= ? AND s.clock_in < ?");
        args.push(Box::new(to_db(from)));
        args.push(Box::new(to_db(to)));
    }
}

/// Shifts ordered by clock-in, optionally restricted to one user and to
/// clock-ins inside the half-open window [from, to).
pub fn load_shifts(
    conn: &Connection,
    user_id: Option<i64>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<Shift>> {
    let mut sql = String::from("SELECT s.* FROM shifts s WHERE 1 = 1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    push_shift_filters(&mut sql, &mut args, user_id, window);
    sql.push_str(" ORDER BY s.clock_in ASC, s.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter().map(|a| a.as_ref())), map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------------------------
// Breaks
// ------------------------------------------------------------------

/// The open break of a shift (`break_end IS NULL`), if any.
pub fn find_open_break(conn: &Connection, shift_id: i64) -> AppResult<Option<Break>> {
    Ok(conn
        .query_row(
            "SELECT * FROM breaks WHERE shift_id = ?1 AND break_end IS NULL",
            [shift_id],
            map_break,
        )
        .optional()?)
}

pub fn insert_break(conn: &Connection, shift_id: i64, start: DateTime<Utc>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO breaks (shift_id, break_start) VALUES (?1, ?2)",
        params![shift_id, to_db(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_break(conn: &Connection, break_id: i64, end: DateTime<Utc>) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE breaks SET break_end = ?1 WHERE id = ?2 AND break_end IS NULL",
        params![to_db(end), break_id],
    )?;
    if changed != 1 {
        return Err(AppError::Other(format!("break {break_id} is not open")));
    }
    Ok(())
}

pub fn load_breaks_for_shift(conn: &Connection, shift_id: i64) -> AppResult<Vec<Break>> {
    let mut stmt =
        conn.prepare("SELECT * FROM breaks WHERE shift_id = ?1 ORDER BY break_start ASC")?;
    let rows = stmt.query_map([shift_id], map_break)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Latest `break_end` among the closed breaks of a shift.
pub fn last_break_end(conn: &Connection, shift_id: i64) -> AppResult<Option<DateTime<Utc>>> {
    let raw: Option<String> = conn.query_row(
        "SELECT MAX(break_end) FROM breaks WHERE shift_id = ?1",
        [shift_id],
        |row| row.get(0),
    )?;
    raw.as_deref().map(from_db).transpose()
}

/// Breaks of every shift `load_shifts` selects with the same filters,
/// grouped by shift id.
pub fn load_breaks_for_shifts(
    conn: &Connection,
    user_id: Option<i64>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<HashMap<i64, Vec<Break>>> {
    let mut sql = String::from(
        "SELECT b.* FROM breaks b JOIN shifts s ON s.id = b.shift_id WHERE 1 = 1",
    );
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    push_shift_filters(&mut sql, &mut args, user_id, window);
    sql.push_str(" ORDER BY b.break_start ASC, b.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter().map(|a| a.as_ref())), map_break)?;

    let mut grouped: HashMap<i64, Vec<Break>> = HashMap::new();
    for r in rows {
        let b = r?;
        grouped.entry(b.shift_id).or_default().push(b);
    }
    Ok(grouped)
}

// ------------------------------------------------------------------
// Sessions
// ------------------------------------------------------------------

pub fn find_open_session(conn: &Connection) -> AppResult<Option<Session>> {
    Ok(conn
        .query_row(
            "SELECT * FROM sessions WHERE ended_at IS NULL",
            [],
            map_session,
        )
        .optional()?)
}

pub fn open_session(conn: &Connection, user_id: i64, started_at: DateTime<Utc>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (user_id, started_at) VALUES (?1, ?2)",
        params![user_id, to_db(started_at)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close every open session; returns how many were closed.
pub fn close_open_sessions(conn: &Connection, ended_at: DateTime<Utc>) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE sessions SET ended_at = ?1 WHERE ended_at IS NULL",
        params![to_db(ended_at)],
    )?)
}
