use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::{from_db, local_date};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> AppResult<i64> {
    Ok(pool.conn.query_row(sql, [], |row| row.get(0))?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let profiles = count(pool, "SELECT COUNT(*) FROM profiles")?;
    let shifts = count(pool, "SELECT COUNT(*) FROM shifts")?;
    let open_shifts = count(pool, "SELECT COUNT(*) FROM shifts WHERE clock_out IS NULL")?;
    let breaks = count(pool, "SELECT COUNT(*) FROM breaks")?;

    println!("{}• Profiles:{} {}{}{}", CYAN, RESET, GREEN, profiles, RESET);
    println!(
        "{}• Shifts:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, shifts, RESET, open_shifts
    );
    println!("{}• Breaks:{} {}{}{}", CYAN, RESET, GREEN, breaks, RESET);

    //
    // 3) CLOCK-IN RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(clock_in) FROM shifts", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(clock_in) FROM shifts", [], |row| row.get(0))
        .optional()?
        .flatten();

    let render = |v: Option<String>| -> AppResult<String> {
        match v {
            Some(s) => Ok(local_date(from_db(&s)?)),
            None => Ok(format!("{GREY}--{RESET}")),
        }
    };

    println!("{}• Clock-in range:{}", CYAN, RESET);
    println!("    from: {}", render(first)?);
    println!("    to:   {}", render(last)?);

    println!();
    Ok(())
}
