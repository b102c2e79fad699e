//! Dependencies reducers receive instead of reaching for globals.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Now
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of unique identifiers for newly created entities
pub trait IdGenerator: Send + Sync {
    /// An id this generator has never returned before
    fn next_id(&self) -> Uuid;
}

/// Random (v4) UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
