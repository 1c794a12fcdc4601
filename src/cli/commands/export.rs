use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::core::timesheet::Scope;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::clock::Clock;
use crate::utils::date::resolve_range;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        all,
        user,
        force,
    } = cmd
    {
        let now = clock.now();
        let mut pool = DbPool::open(cfg)?;
        let viewer = SessionLogic::require_user(&pool.conn)?;

        let today = now.with_timezone(&chrono::Local).date_naive();
        let bounds = resolve_range(range.as_deref(), today)?;
        let scope = Scope::from_flags(*all, user.as_deref());

        ExportLogic::export(&mut pool, &viewer, &scope, *format, file, bounds, *force, now)?;
    }
    Ok(())
}
