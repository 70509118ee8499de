use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::clock::Clock;
use super::domain::{
    AccountId, CompanyAccounts, Plan, PlanDraft, PlanId, SocialAccounting, Transfer, TransferType,
    MAX_PLAN_TIMEFRAME_DAYS,
};
use super::error::AccountingError;
use super::payout_factor::{PayoutFactorConfig, PayoutFactorService};
use super::repository::{PlanRepository, TransferRepository};

/// Books the transfers caused by plan approval and registered labour.
///
/// Public plans are credited out of the public sector fund; every registered
/// hour pays `1 - payout factor` back into it as taxes.
pub struct SocialAccountingLedger<P, T, C, K> {
    plans: Arc<P>,
    transfers: Arc<T>,
    payout_factor: Arc<PayoutFactorService<P, C, K>>,
    clock: Arc<K>,
    social_accounting: SocialAccounting,
}

impl<P, T, C, K> SocialAccountingLedger<P, T, C, K>
where
    P: PlanRepository + 'static,
    T: TransferRepository + 'static,
    C: PayoutFactorConfig + 'static,
    K: Clock + 'static,
{
    pub fn new(
        plans: Arc<P>,
        transfers: Arc<T>,
        payout_factor: Arc<PayoutFactorService<P, C, K>>,
        clock: Arc<K>,
        social_accounting: SocialAccounting,
    ) -> Self {
        Self {
            plans,
            transfers,
            payout_factor,
            clock,
            social_accounting,
        }
    }

    /// Approve `draft` now and credit the planner's means, resource and labour accounts.
    ///
    /// The credits are booked before the plan is stored, so a failed booking
    /// never leaves an approved plan behind.
    pub fn approve_plan(
        &self,
        draft: PlanDraft,
        planner: &CompanyAccounts,
    ) -> Result<Plan, AccountingError> {
        let plan = Plan {
            id: PlanId::new(),
            name: draft.name,
            approval_date: Some(self.clock.now()),
            timeframe_days: draft.timeframe_days,
            is_public_service: draft.is_public_service,
            production_costs: draft.production_costs,
        };
        if plan.timeframe_days > MAX_PLAN_TIMEFRAME_DAYS || plan.expiration_date().is_none() {
            return Err(AccountingError::TimeframeOutOfRange(
                plan.id,
                plan.timeframe_days,
            ));
        }

        let costs = plan.production_costs;
        let sa = &self.social_accounting;
        let credits = if plan.is_public_service {
            [
                (&sa.account_psf, &planner.means, costs.means_cost, TransferType::CreditPublicP),
                (&sa.account_psf, &planner.resources, costs.resource_cost, TransferType::CreditPublicR),
                (&sa.account_psf, &planner.labour, costs.labour_cost, TransferType::CreditPublicA),
            ]
        } else {
            [
                (&sa.account_p, &planner.means, costs.means_cost, TransferType::CreditP),
                (&sa.account_r, &planner.resources, costs.resource_cost, TransferType::CreditR),
                (&sa.account_a, &planner.labour, costs.labour_cost, TransferType::CreditA),
            ]
        };
        for (debit, credit, value, transfer_type) in credits {
            self.book(debit, credit, value, transfer_type)?;
        }
        let plan = self.plans.insert(plan)?;

        info!(
            plan = %plan.id,
            public = plan.is_public_service,
            total_cost = %costs.total(),
            "approved plan"
        );
        Ok(plan)
    }

    /// Pay `hours` of work certificates to `worker` and levy the fund's share.
    pub fn register_hours_worked(
        &self,
        company: &CompanyAccounts,
        worker: &AccountId,
        hours: Decimal,
    ) -> Result<(), AccountingError> {
        if hours < Decimal::ZERO {
            return Err(AccountingError::NegativeHours(hours));
        }

        let payout_factor = self.payout_factor.calculate_current_payout_factor()?;
        let taxes = hours * (Decimal::ONE - payout_factor);

        self.book(
            &company.labour,
            worker,
            hours,
            TransferType::WorkCertificates,
        )?;
        self.book(
            worker,
            &self.social_accounting.account_psf,
            taxes,
            TransferType::Taxes,
        )?;

        info!(%worker, %hours, %payout_factor, %taxes, "registered hours worked");
        Ok(())
    }

    fn book(
        &self,
        debit_account: &AccountId,
        credit_account: &AccountId,
        value: Decimal,
        transfer_type: TransferType,
    ) -> Result<(), AccountingError> {
        self.transfers.record(Transfer {
            date: self.clock.now(),
            debit_account: debit_account.clone(),
            credit_account: credit_account.clone(),
            value,
            transfer_type,
        })?;
        Ok(())
    }
}
