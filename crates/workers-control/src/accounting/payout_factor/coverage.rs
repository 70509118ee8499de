use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Fraction of a plan's lifetime that falls inside `[window_start, window_end)`.
///
/// Both the covered span and the plan duration are counted in whole days,
/// truncated rather than rounded. The result is normalized by the plan's own
/// duration, so a plan longer than the window never reaches 1. Plans shorter
/// than a day have no duration to normalize by and yield 0.
pub fn coverage(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    plan_approval: DateTime<Utc>,
    plan_expiration: DateTime<Utc>,
) -> Decimal {
    let plan_days = (plan_expiration - plan_approval).num_days();
    if plan_days <= 0 {
        return Decimal::ZERO;
    }

    let overlap_start = plan_approval.max(window_start);
    let overlap_end = plan_expiration.min(window_end);
    let covered_days = (overlap_end - overlap_start).num_days().max(0);

    Decimal::from(covered_days) / Decimal::from(plan_days)
}
