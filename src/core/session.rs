//! Who is signed in against this database.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_open_sessions, find_open_session, find_profile, find_profile_by_id, open_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::profile::Profile;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::info;

pub struct SessionLogic;

impl SessionLogic {
    /// Profile of the open session, if any.
    pub fn current_user(conn: &Connection) -> AppResult<Option<Profile>> {
        match find_open_session(conn)? {
            Some(session) => find_profile_by_id(conn, session.user_id),
            None => Ok(None),
        }
    }

    pub fn require_user(conn: &Connection) -> AppResult<Profile> {
        Self::current_user(conn)?.ok_or(AppError::NotSignedIn)
    }

    pub fn require_admin(conn: &Connection) -> AppResult<Profile> {
        let user = Self::require_user(conn)?;
        if !user.role.is_admin() {
            return Err(AppError::Forbidden(format!(
                "{} is not an admin",
                user.email
            )));
        }
        Ok(user)
    }

    /// Sign in as `who` (profile id or email), replacing any open session.
    pub fn sign_in(pool: &mut DbPool, who: &str, now: DateTime<Utc>) -> AppResult<Profile> {
        let tx = pool.write_tx()?;

        let profile =
            find_profile(&tx, who)?.ok_or_else(|| AppError::UnknownUser(who.to_string()))?;

        close_open_sessions(&tx, now)?;
        open_session(&tx, profile.id, now)?;
        ttlog(&tx, "login", &profile.email, "Signed in")?;
        tx.commit()?;

        info!(user_id = profile.id, "signed in");
        Ok(profile)
    }

    /// Close the open session. Returns the profile that was signed in.
    pub fn sign_out(pool: &mut DbPool, now: DateTime<Utc>) -> AppResult<Option<Profile>> {
        let tx = pool.write_tx()?;

        let who = Self::current_user(&tx)?;
        if close_open_sessions(&tx, now)? > 0 {
            let target = who.as_ref().map(|p| p.email.as_str()).unwrap_or("");
            ttlog(&tx, "logout", target, "Signed out")?;
        }
        tx.commit()?;

        Ok(who)
    }
}
