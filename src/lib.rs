//! shiftclock library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::action::ClockAction;
use utils::clock::{self, Clock};
use utils::time::parse_timestamp;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    use crate::cli::commands as cmd;

    match &cli.command {
        Commands::Init => cmd::init::handle(cli),
        Commands::Config { .. } => cmd::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cmd::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cmd::log::handle(&cli.command, cfg),
        Commands::User { .. } => cmd::user::handle(&cli.command, cfg, clock),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cmd::session::handle(&cli.command, cfg, clock)
        }
        Commands::Status => cmd::status::handle(cfg, clock),
        Commands::ClockIn => cmd::clock::handle(ClockAction::ClockIn, cfg, clock),
        Commands::ClockOut => cmd::clock::handle(ClockAction::ClockOut, cfg, clock),
        Commands::BreakStart => cmd::clock::handle(ClockAction::StartBreak, cfg, clock),
        Commands::BreakEnd => cmd::clock::handle(ClockAction::EndBreak, cfg, clock),
        Commands::Timesheet { .. } => cmd::timesheet::handle(&cli.command, cfg, clock),
        Commands::Export { .. } => cmd::export::handle(&cli.command, cfg, clock),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; `--db` overrides the configured database.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    utils::logging::init_logging(&cfg.log_level);

    let at = cli.now.as_deref().map(parse_timestamp).transpose()?;
    let clock = clock::from_override(at);

    dispatch(&cli, &cfg, clock.as_ref())
}
