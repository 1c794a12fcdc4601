use crate::config::Config;
use crate::core::clock::{ClockLogic, ClockOutcome};
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::action::ClockAction;
use crate::ui::messages::success;
use crate::utils::clock::Clock;
use crate::utils::time::local_time;

fn describe(outcome: &ClockOutcome) -> String {
    let at = local_time(outcome.at);
    match (outcome.action, outcome.break_id) {
        (ClockAction::ClockIn, _) => format!("Clocked in at {} (shift #{}).", at, outcome.shift_id),
        (ClockAction::ClockOut, Some(b)) => format!(
            "Ended break #{} and clocked out at {} (shift #{}).",
            b, at, outcome.shift_id
        ),
        (ClockAction::ClockOut, None) => {
            format!("Clocked out at {} (shift #{}).", at, outcome.shift_id)
        }
        (ClockAction::StartBreak, _) => format!("Break started at {}.", at),
        (ClockAction::EndBreak, _) => format!("Break ended at {}.", at),
    }
}

/// Run one clock action for the signed-in user and report the new status.
pub fn handle(action: ClockAction, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = DbPool::open(cfg)?;
    let user = SessionLogic::require_user(&pool.conn)?;

    let outcome = ClockLogic::apply(&mut pool, &user, action, clock)?;

    success(describe(&outcome));
    println!("Status: {} ({})", outcome.status.badge(), outcome.status.as_str());
    Ok(())
}
