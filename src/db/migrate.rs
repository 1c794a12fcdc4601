use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

/// Ordered schema migrations. Each one runs once; applied versions are
/// recorded in the `log` table with `operation = 'migration_applied'`.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_profiles",
        "Created profiles table",
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name   TEXT NOT NULL DEFAULT '',
            email       TEXT NOT NULL UNIQUE COLLATE NOCASE,
            role        TEXT NOT NULL DEFAULT 'user' CHECK(role IN ('user','admin')),
            created_at  TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250301_0002_shifts",
        "Created shifts table (one open shift per user)",
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            clock_in    TEXT NOT NULL,
            clock_out   TEXT,
            CHECK(clock_out IS NULL OR clock_out >= clock_in)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_shifts_one_open
            ON shifts(user_id) WHERE clock_out IS NULL;
        CREATE INDEX IF NOT EXISTS idx_shifts_user_clock_in ON shifts(user_id, clock_in);
        "#,
    ),
    (
        "20250301_0003_breaks",
        "Created breaks table (one open break per open shift)",
        r#"
        CREATE TABLE IF NOT EXISTS breaks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            shift_id     INTEGER NOT NULL REFERENCES shifts(id) ON DELETE CASCADE,
            break_start  TEXT NOT NULL,
            break_end    TEXT,
            CHECK(break_end IS NULL OR break_end >= break_start)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_breaks_one_open
            ON breaks(shift_id) WHERE break_end IS NULL;
        CREATE INDEX IF NOT EXISTS idx_breaks_shift ON breaks(shift_id);

        CREATE TRIGGER IF NOT EXISTS trg_breaks_need_open_shift
        BEFORE INSERT ON breaks
        WHEN (SELECT clock_out FROM shifts WHERE id = NEW.shift_id) IS NOT NULL
        BEGIN
            SELECT RAISE(ABORT, 'cannot start a break on a closed shift');
        END;

        CREATE TRIGGER IF NOT EXISTS trg_shifts_close_after_breaks
        BEFORE UPDATE OF clock_out ON shifts
        WHEN NEW.clock_out IS NOT NULL
             AND EXISTS (SELECT 1 FROM breaks WHERE shift_id = NEW.id AND break_end IS NULL)
        BEGIN
            SELECT RAISE(ABORT, 'cannot close a shift with an open break');
        END;
        "#,
    ),
    (
        "20250301_0004_sessions",
        "Created sessions table (one signed-in user per database)",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            started_at  TEXT NOT NULL,
            ended_at    TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_open
            ON sessions((ended_at IS NULL)) WHERE ended_at IS NULL;
        "#,
    ),
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            debug!(version, "migration already applied");
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            rusqlite::params![chrono::Local::now().to_rfc3339(), version, message],
        )?;
        tx.commit()?;

        info!(version, "migration applied");
        success(format!("Migration applied: {version} → {message}"));
    }

    Ok(())
}
