pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod session;
pub mod status;
pub mod timesheet;
pub mod user;
