use crate::core::session::SessionLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_profiles, find_profile_by_email, find_profile_by_id, insert_profile, list_profiles,
};
use crate::errors::{AppError, AppResult};
use crate::models::profile::Profile;
use crate::models::role::Role;
use chrono::{DateTime, Utc};

pub struct UserLogic;

impl UserLogic {
    /// Register a profile. The very first profile may be created by anyone;
    /// after that only a signed-in admin may add profiles.
    pub fn add(
        pool: &mut DbPool,
        full_name: &str,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> AppResult<Profile> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::InvalidEmail(email.to_string()));
        }

        let tx = pool.write_tx()?;

        if count_profiles(&tx)? > 0 {
            SessionLogic::require_admin(&tx)?;
        }

        if find_profile_by_email(&tx, email)?.is_some() {
            return Err(AppError::DuplicateUser(email.to_string()));
        }

        let id = insert_profile(&tx, full_name.trim(), email, role, now)?;
        ttlog(
            &tx,
            "user_add",
            email,
            &format!("Added {} ({})", full_name.trim(), role.to_db_str()),
        )?;

        let profile = find_profile_by_id(&tx, id)?
            .ok_or_else(|| AppError::Other(format!("profile {id} vanished after insert")))?;
        tx.commit()?;

        Ok(profile)
    }

    /// All profiles; admin only.
    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Profile>> {
        SessionLogic::require_admin(&pool.conn)?;
        list_profiles(&pool.conn)
    }
}
