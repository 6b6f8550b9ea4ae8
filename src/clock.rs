//! Clock collaborator for the store
//!
//! Every timestamp the store writes (creation times, review due dates,
//! streak activity) comes from a `Clock` supplied by the host, so tests and
//! embedders can control time. Implementations must be monotonically
//! non-decreasing.

use chrono::{DateTime, Utc};

/// Source of the store's current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
