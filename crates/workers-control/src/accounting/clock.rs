use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to an instant until moved explicitly.
#[derive(Debug)]
pub struct FrozenClock {
    instant: Mutex<DateTime<Utc>>,
}

impl FrozenClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    pub fn freeze_time(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    /// Move the pinned instant forward, one day when `by` is `None`.
    pub fn advance_time(&self, by: Option<Duration>) -> DateTime<Utc> {
        let mut guard = self.lock();
        *guard += by.unwrap_or_else(|| Duration::days(1));
        *guard
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned lock still holds a valid instant.
        self.instant
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
