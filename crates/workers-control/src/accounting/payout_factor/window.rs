use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::coverage::coverage;
use crate::accounting::domain::PlanLifetime;

/// Time interval of configurable length centered on the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlidingWindow {
    pub center: DateTime<Utc>,
    pub size_in_days: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl GlidingWindow {
    /// Edges that would leave the calendar are clamped to its first and last instant.
    pub fn centered_on(center: DateTime<Utc>, size_in_days: u32) -> Self {
        // Odd sizes put the edges on half days.
        let half = Duration::hours(i64::from(size_in_days) * 12);
        Self {
            center,
            size_in_days,
            start: center
                .checked_sub_signed(half)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: center
                .checked_add_signed(half)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Plans expiring at or before this instant are too old to be considered.
    ///
    /// The lookback spans a full window length, twice what the coverage test
    /// reaches back.
    pub fn lookback_threshold(&self) -> DateTime<Utc> {
        self.center
            .checked_sub_signed(Duration::days(i64::from(self.size_in_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn coverage_of(&self, lifetime: &PlanLifetime) -> Decimal {
        coverage(self.start, self.end, lifetime.approval, lifetime.expiration)
    }
}
