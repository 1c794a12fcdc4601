use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::core::timesheet::{Scope, Timesheet, TimesheetLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::clock::Clock;
use crate::utils::colors::colorize_in_out;
use crate::utils::date::{describe_range, resolve_range};
use crate::utils::formatting::bold;
use crate::utils::mins2readable;
use crate::utils::table::Table;
use crate::utils::time::{local_date, local_time, local_time_opt};
use chrono::{DateTime, Local, Utc};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Timesheet {
        range,
        all,
        user,
        details,
    } = cmd
    {
        let now = clock.now();
        let pool = DbPool::open(cfg)?;
        let viewer = SessionLogic::require_user(&pool.conn)?;

        let today = now.with_timezone(&Local).date_naive();
        let bounds = resolve_range(range.as_deref(), today)?;
        let scope = Scope::from_flags(*all, user.as_deref());

        let sheet = TimesheetLogic::build(&pool.conn, &viewer, &scope, bounds, now)?;

        header(format!("Timesheet for {}", describe_range(&bounds)));

        if sheet.is_empty() {
            info("No shifts in the selected range.");
            return Ok(());
        }

        print_lines(&sheet, cfg, *details, scope != Scope::Own, now);
        print_totals(&sheet, cfg);
    }

    Ok(())
}

fn print_lines(
    sheet: &Timesheet,
    cfg: &Config,
    details: bool,
    with_employee: bool,
    now: DateTime<Utc>,
) {
    let mut headers = Vec::new();
    if with_employee {
        headers.push("Employee");
    }
    headers.extend(["Date", "In", "Out", "Breaks", "Worked"]);

    let mut table = Table::new(headers);
    for line in &sheet.lines {
        let mut row = Vec::new();
        if with_employee {
            row.push(line.employee.clone());
        }
        let worked = mins2readable(line.durations.worked_minutes, false, false);
        row.extend([
            local_date(line.shift.clock_in),
            colorize_in_out(&local_time(line.shift.clock_in), true),
            colorize_in_out(&local_time_opt(line.shift.clock_out), false),
            mins2readable(line.durations.break_minutes, false, false),
            if line.is_open() {
                format!("{worked} (open)")
            } else {
                worked
            },
        ]);
        table.add_row(row);

        if details {
            for b in &line.breaks {
                let mut sub = Vec::new();
                if with_employee {
                    sub.push(String::new());
                }
                sub.extend([
                    "  ↳ break".to_string(),
                    local_time(b.break_start),
                    local_time_opt(b.break_end),
                    mins2readable(b.minutes(now), false, false),
                    String::new(),
                ]);
                table.add_row(sub);
            }
        }
    }

    print!("{}", table.render(&cfg.separator_char));
}

fn print_totals(sheet: &Timesheet, cfg: &Config) {
    println!();
    let mut table = Table::new(["Employee", "Shifts", "Breaks", "Worked"]);
    for t in &sheet.totals {
        table.add_row(vec![
            t.employee.clone(),
            t.shifts.to_string(),
            mins2readable(t.break_minutes, false, false),
            mins2readable(t.worked_minutes, false, false),
        ]);
    }
    print!("{}", table.render(&cfg.separator_char));

    if sheet.totals.len() > 1 {
        println!(
            "\n{} {}",
            bold("Total worked:"),
            mins2readable(sheet.total_worked_minutes(), false, false)
        );
    }
}
