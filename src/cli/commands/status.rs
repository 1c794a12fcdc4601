use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::core::status::StatusResolver;
use crate::core::timesheet::shift_durations;
use crate::db::pool::DbPool;
use crate::db::queries::load_breaks_for_shift;
use crate::errors::AppResult;
use crate::models::status::WorkStatus;
use crate::utils::clock::Clock;
use crate::utils::mins2readable;
use crate::utils::time::local_time;

pub fn handle(cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let pool = DbPool::open(cfg)?;
    let user = SessionLogic::require_user(&pool.conn)?;
    let snap = StatusResolver::resolve(&pool.conn, user.id)?;

    println!("Status: {} ({})", snap.status.badge(), snap.status.as_str());

    if let Some(shift) = &snap.shift {
        let breaks = load_breaks_for_shift(&pool.conn, shift.id)?;
        let d = shift_durations(shift, &breaks, clock.now());

        println!("Clocked in at {} (shift #{})", local_time(shift.clock_in), shift.id);
        println!(
            "Worked so far: {} | Breaks: {}",
            mins2readable(d.worked_minutes, false, false),
            mins2readable(d.break_minutes, false, false)
        );

        if let (WorkStatus::OnBreak, Some(b)) = (snap.status, &snap.open_break) {
            println!("On break since {}", local_time(b.break_start));
        }
    }

    Ok(())
}
