use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::core::status::StatusResolver;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::clock::Clock;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = DbPool::open(cfg)?;

    match cmd {
        Commands::Login { who } => {
            let profile = SessionLogic::sign_in(&mut pool, who, clock.now())?;
            success(format!(
                "Signed in as {} <{}> ({}).",
                profile.display_name(),
                profile.email,
                profile.role.to_db_str()
            ));
        }

        Commands::Logout => match SessionLogic::sign_out(&mut pool, clock.now())? {
            Some(profile) => success(format!("Signed out {}.", profile.email)),
            None => warning("Nobody is signed in."),
        },

        Commands::Whoami => {
            let profile = SessionLogic::require_user(&pool.conn)?;
            let snap = StatusResolver::resolve(&pool.conn, profile.id)?;

            println!("Welcome, {}!", profile.display_name());
            println!(
                "{}",
                clock
                    .now()
                    .with_timezone(&Local)
                    .format("%A, %B %-d, %Y")
            );
            info(format!(
                "#{} <{}> | role: {} | status: {}",
                profile.id,
                profile.email,
                profile.role.to_db_str(),
                snap.status.badge()
            ));
        }

        _ => {}
    }

    Ok(())
}
