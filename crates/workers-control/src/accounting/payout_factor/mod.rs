//! Payout factor (FIC) over a gliding window of approved plans.
//!
//! Every approved plan that has not expired more than one window length ago is
//! weighted by its coverage of the window. Productive labour, minus the means and
//! resources claimed by public plans, relative to all weighted labour gives the
//! share of labour certificates that can be paid out.

mod config;
mod coverage;
mod window;

pub use config::{PayoutFactorConfig, WindowLengthConfig};
pub use coverage::coverage;
pub use window::GlidingWindow;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::clock::Clock;
use super::domain::{Plan, PlanLifetime, ProductionCosts};
use super::error::AccountingError;
use super::repository::{PlanQuery, PlanRepository};

/// Service computing the current payout factor from live plan data.
pub struct PayoutFactorService<P, C, K> {
    plans: Arc<P>,
    config: Arc<C>,
    clock: Arc<K>,
}

impl<P, C, K> PayoutFactorService<P, C, K>
where
    P: PlanRepository + 'static,
    C: PayoutFactorConfig + 'static,
    K: Clock + 'static,
{
    pub fn new(plans: Arc<P>, config: Arc<C>, clock: Arc<K>) -> Self {
        Self {
            plans,
            config,
            clock,
        }
    }

    /// Window centered on the clock's current instant.
    pub fn current_window(&self) -> GlidingWindow {
        GlidingWindow::centered_on(self.clock.now(), self.config.window_length_in_days())
    }

    pub fn calculate_current_payout_factor(&self) -> Result<Decimal, AccountingError> {
        let window = self.current_window();
        let plans = self.plans_considered(&window)?;
        let factor = payout_factor_for(&window, &plans)?;
        debug!(
            window_days = window.size_in_days,
            plans = plans.len(),
            %factor,
            "calculated payout factor"
        );
        Ok(factor)
    }

    /// Approved plans expiring after the window's lookback threshold.
    pub fn plans_considered(&self, window: &GlidingWindow) -> Result<Vec<Plan>, AccountingError> {
        let query = PlanQuery::new()
            .that_are_approved()
            .that_will_expire_after(window.lookback_threshold());
        Ok(self.plans.plans(&query)?)
    }
}

/// Payout factor of `plans` weighted against `window`.
///
/// Fails when a plan without approval dates is passed in, which means the
/// repository ignored the approval filter, or when a plan expires past the
/// calendar's end.
pub fn payout_factor_for(window: &GlidingWindow, plans: &[Plan]) -> Result<Decimal, AccountingError> {
    let mut totals = SectorTotals::default();
    for plan in plans {
        let lifetime = lifetime_of(plan)?;
        let weighted = plan.production_costs.scaled(window.coverage_of(&lifetime));
        totals.add(plan.is_public_service, &weighted);
    }
    Ok(totals.payout_factor())
}

/// Lifetime of an approved plan, or the reason it has none.
pub(crate) fn lifetime_of(plan: &Plan) -> Result<PlanLifetime, AccountingError> {
    match plan.lifetime() {
        Some(lifetime) => Ok(lifetime),
        None if plan.is_approved() => Err(AccountingError::TimeframeOutOfRange(
            plan.id,
            plan.timeframe_days,
        )),
        None => Err(AccountingError::PlanNotApproved(plan.id)),
    }
}

#[derive(Debug, Default)]
struct SectorTotals {
    productive_labour: Decimal,
    public_labour: Decimal,
    public_means_and_resources: Decimal,
}

impl SectorTotals {
    fn add(&mut self, is_public_service: bool, weighted: &ProductionCosts) {
        if is_public_service {
            self.public_labour += weighted.labour_cost;
            self.public_means_and_resources += weighted.means_cost + weighted.resource_cost;
        } else {
            self.productive_labour += weighted.labour_cost;
        }
    }

    fn payout_factor(&self) -> Decimal {
        let total_labour = self.productive_labour + self.public_labour;
        if total_labour.is_zero() {
            return Decimal::ONE;
        }
        let factor = (self.productive_labour - self.public_means_and_resources) / total_labour;
        factor.max(Decimal::ZERO)
    }
}
