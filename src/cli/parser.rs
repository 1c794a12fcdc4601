use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftclock
#[derive(Parser)]
#[command(
    name = "shiftclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee time clock: clock in/out, breaks and admin timesheets using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Use this instant as "now" (RFC 3339 or "YYYY-MM-DD HH:MM")
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employee profiles
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Sign in as a user (profile id or email)
    Login { who: String },

    /// Sign out the current user
    Logout,

    /// Show the signed-in user and their current status
    Whoami,

    /// Show the current work status
    Status,

    /// Start a shift
    ClockIn,

    /// End the current shift (ends an open break first)
    ClockOut,

    /// Start a break in the current shift
    BreakStart,

    /// End the current break
    BreakEnd,

    /// Show worked time per shift and per user
    Timesheet {
        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD, A:B or 'all' (default: current month)"
        )]
        range: Option<String>,

        #[arg(long, conflicts_with = "user", help = "All users (admin only)")]
        all: bool,

        #[arg(long, value_name = "ID|EMAIL", help = "A single user (admin only)")]
        user: Option<String>,

        #[arg(long = "details", help = "List the breaks of every shift")]
        details: bool,
    },

    /// Export timesheet rows
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD, A:B or 'all' (default: current month)"
        )]
        range: Option<String>,

        #[arg(long, conflicts_with = "user", help = "All users (admin only)")]
        all: bool,

        #[arg(long, value_name = "ID|EMAIL", help = "A single user (admin only)")]
        user: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a profile (the first one needs no sign-in, later ones need an admin)
    Add {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "email")]
        email: String,

        #[arg(long = "role", default_value = "user", help = "user or admin")]
        role: String,
    },

    /// List all profiles (admin only)
    List,
}
