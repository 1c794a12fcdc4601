//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so every failure
//! reaches the user through the same `Error: ...` line in main.rs.

use crate::models::action::ClockAction;
use crate::models::status::WorkStatus;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0} (expected 'user' or 'admin')")]
    InvalidRole(String),

    // ---------------------------
    // Clock / session logic
    // ---------------------------
    #[error("Cannot {action} while {status}")]
    InvalidTransition {
        action: ClockAction,
        status: WorkStatus,
    },

    #[error("Not signed in: run `shiftclock login <id|email>` first")]
    NotSignedIn,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("A user with email '{0}' already exists")]
    DuplicateUser(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
