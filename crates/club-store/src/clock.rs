use chrono::{DateTime, Utc};

/// Seam for injecting the current time, so notification timestamps and
/// week-start computation are deterministic under test. Grounded in the
/// teacher's `start_ingest(conn, at: DateTime<Utc>)`, which takes the time
/// from its caller rather than calling `Utc::now()` inside the query.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-util"))]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(any(test, feature = "test-util"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
