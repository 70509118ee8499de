use std::sync::Arc;

use super::views::{PayoutFactorDetails, PayoutFactorWindowDetails, PlanCoverageView, WindowPlanView};
use crate::accounting::clock::Clock;
use crate::accounting::domain::{Plan, PlanLifetime};
use crate::accounting::error::AccountingError;
use crate::accounting::payout_factor::{
    lifetime_of, payout_factor_for, GlidingWindow, PayoutFactorConfig, PayoutFactorService,
};
use crate::accounting::repository::{PlanQuery, PlanRepository};

/// Payout factor together with the plans it was computed from.
pub struct PayoutFactorDetailsInteractor<P, C, K> {
    service: Arc<PayoutFactorService<P, C, K>>,
}

impl<P, C, K> PayoutFactorDetailsInteractor<P, C, K>
where
    P: PlanRepository + 'static,
    C: PayoutFactorConfig + 'static,
    K: Clock + 'static,
{
    pub fn new(service: Arc<PayoutFactorService<P, C, K>>) -> Self {
        Self { service }
    }

    /// Lists every plan the calculation considers, including those with zero coverage.
    pub fn show_payout_factor_details(&self) -> Result<PayoutFactorDetails, AccountingError> {
        let window = self.service.current_window();
        let plans = self.service.plans_considered(&window)?;
        let payout_factor = payout_factor_for(&window, &plans)?;

        let plans = sorted_by_lifetime(plans)?
            .into_iter()
            .map(|(plan, lifetime)| PlanCoverageView {
                id: plan.id,
                name: plan.name,
                approval_date: lifetime.approval,
                expiration_date: lifetime.expiration,
                is_public_service: plan.is_public_service,
                timeframe: plan.timeframe_days,
                coverage: window.coverage_of(&lifetime),
            })
            .collect();

        Ok(PayoutFactorDetails {
            payout_factor,
            window_center: window.center,
            window_size_in_days: window.size_in_days,
            window_start: window.start,
            window_end: window.end,
            plans,
        })
    }
}

/// Window bounds next to all approved plans, for timeline renderings.
pub struct PayoutFactorWindowDetailsInteractor<P, C, K> {
    plans: Arc<P>,
    config: Arc<C>,
    clock: Arc<K>,
}

impl<P, C, K> PayoutFactorWindowDetailsInteractor<P, C, K>
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

    pub fn show_payout_factor_window_details(
        &self,
    ) -> Result<PayoutFactorWindowDetails, AccountingError> {
        let window =
            GlidingWindow::centered_on(self.clock.now(), self.config.window_length_in_days());
        let approved = self.plans.plans(&PlanQuery::new().that_are_approved())?;

        let plans = sorted_by_lifetime(approved)?
            .into_iter()
            .map(|(plan, lifetime)| WindowPlanView {
                id: plan.id,
                approval_date: lifetime.approval,
                expiration_date: lifetime.expiration,
                is_public_service: plan.is_public_service,
                timeframe: plan.timeframe_days,
            })
            .collect();

        Ok(PayoutFactorWindowDetails::new(&window, plans))
    }
}

/// Order by approval date, then expiration date.
fn sorted_by_lifetime(plans: Vec<Plan>) -> Result<Vec<(Plan, PlanLifetime)>, AccountingError> {
    let mut with_lifetime = plans
        .into_iter()
        .map(|plan| lifetime_of(&plan).map(|lifetime| (plan, lifetime)))
        .collect::<Result<Vec<_>, _>>()?;
    with_lifetime.sort_by_key(|(_, lifetime)| (lifetime.approval, lifetime.expiration));
    Ok(with_lifetime)
}
