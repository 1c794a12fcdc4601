use crate::cli::parser::{Commands, UserCommand};
use crate::config::Config;
use crate::core::profiles::UserLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{header, success};
use crate::utils::clock::Clock;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = DbPool::open(cfg)?;

        match action {
            UserCommand::Add { name, email, role } => {
                let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
                let profile = UserLogic::add(&mut pool, name, email, role, clock.now())?;
                success(format!(
                    "Added {} <{}> as {} (id {}).",
                    profile.display_name(),
                    profile.email,
                    profile.role.to_db_str(),
                    profile.id
                ));
            }

            UserCommand::List => {
                let profiles = UserLogic::list(&mut pool)?;

                header("Profiles");
                let mut table = Table::new(["ID", "Name", "Email", "Role"]);
                for p in &profiles {
                    table.add_row(vec![
                        p.id.to_string(),
                        p.display_name().to_string(),
                        p.email.clone(),
                        p.role.to_db_str().to_string(),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}
