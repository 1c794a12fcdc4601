//! SQLite connection wrapper (one connection per CLI process).

use crate::errors::AppResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_timeout(path, Duration::from_millis(5_000))
    }

    /// Open the database, enable foreign keys and wait up to `busy` for
    /// another process holding the write lock.
    pub fn with_timeout(path: &str, busy: Duration) -> AppResult<Self> {
        debug!(path, "opening database");
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(busy)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn open(cfg: &crate::config::Config) -> AppResult<Self> {
        Self::with_timeout(&cfg.database, Duration::from_millis(cfg.busy_timeout_ms))
    }

    /// Start a write transaction that takes the lock up front, so a status
    /// read inside it cannot be invalidated by a concurrent writer.
    pub fn write_tx(&mut self) -> AppResult<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}
