use rust_decimal::Decimal;

use super::domain::{PlanId, MAX_PLAN_TIMEFRAME_DAYS};
use super::repository::RepositoryError;

/// Error raised by the accounting services.
#[derive(Debug, thiserror::Error)]
pub enum AccountingError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("plan {0} reached the payout factor calculation without an approval date")]
    PlanNotApproved(PlanId),
    #[error(
        "plan {0} has a timeframe of {1} days, beyond the supported {max}",
        max = MAX_PLAN_TIMEFRAME_DAYS
    )]
    TimeframeOutOfRange(PlanId, u32),
    #[error("registered hours must not be negative, got {0}")]
    NegativeHours(Decimal),
}
