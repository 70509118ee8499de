use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::{PayoutFactorSettings, DEFAULT_WINDOW_LENGTH_IN_DAYS};

/// Supplies the gliding window length to the payout factor calculation.
pub trait PayoutFactorConfig: Send + Sync {
    fn window_length_in_days(&self) -> u32;
}

/// Window length owned by the caller and shared with the services through `Arc`.
///
/// The setter takes `&self` so an owner holding the same `Arc` as a running
/// service can resize the window between calculations.
#[derive(Debug)]
pub struct WindowLengthConfig {
    days: AtomicU32,
}

impl WindowLengthConfig {
    pub fn new(days: u32) -> Self {
        Self {
            days: AtomicU32::new(days),
        }
    }

    pub fn set_window_length(&self, days: u32) {
        self.days.store(days, Ordering::Relaxed);
    }
}

impl Default for WindowLengthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_LENGTH_IN_DAYS)
    }
}

impl From<PayoutFactorSettings> for WindowLengthConfig {
    fn from(settings: PayoutFactorSettings) -> Self {
        Self::new(settings.window_length_in_days)
    }
}

impl PayoutFactorConfig for WindowLengthConfig {
    fn window_length_in_days(&self) -> u32 {
        self.days.load(Ordering::Relaxed)
    }
}
