use chrono::{DateTime, Utc};

/// Source of "now" for every write the clock core performs.
/// Injected so scenarios can be replayed at fixed instants.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always answers the same instant (hidden `--now` flag and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Pick the fixed clock when an override instant was supplied.
pub fn from_override(at: Option<DateTime<Utc>>) -> Box<dyn Clock> {
    match at {
        Some(ts) => Box::new(FixedClock(ts)),
        None => Box::new(SystemClock),
    }
}
