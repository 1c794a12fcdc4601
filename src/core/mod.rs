pub mod clock;
pub mod log;
pub mod profiles;
pub mod session;
pub mod status;
pub mod timesheet;
