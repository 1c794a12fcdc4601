pub mod action;
pub mod breaks;
pub mod profile;
pub mod role;
pub mod session;
pub mod shift;
pub mod status;
