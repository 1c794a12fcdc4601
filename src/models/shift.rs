use crate::utils::time::minutes_between;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    pub id: i64,
    pub user_id: i64,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>, // None ⇔ open shift
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Whole minutes from clock-in to clock-out, or to `now` while open.
    pub fn span_minutes(&self, now: DateTime<Utc>) -> i64 {
        minutes_between(self.clock_in, self.clock_out.unwrap_or(now))
    }
}
