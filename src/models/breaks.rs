use crate::utils::time::minutes_between;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub id: i64,
    pub shift_id: i64,
    pub break_start: DateTime<Utc>,
    pub break_end: Option<DateTime<Utc>>, // None ⇔ open break
}

impl Break {
    pub fn is_open(&self) -> bool {
        self.break_end.is_none()
    }

    /// Whole minutes of the break, counting an open break up to `now`.
    pub fn minutes(&self, now: DateTime<Utc>) -> i64 {
        minutes_between(self.break_start, self.break_end.unwrap_or(now))
    }
}
