use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::accounting::clock::{Clock, FrozenClock};
use crate::accounting::details::{
    PayoutFactorDetailsInteractor, PayoutFactorWindowDetailsInteractor,
    PsfAccountDetailsInteractor,
};
use crate::accounting::domain::{
    AccountId, CompanyAccounts, Plan, PlanDraft, PlanId, ProductionCosts, SocialAccounting,
    Transfer, TransferType,
};
use crate::accounting::ledger::SocialAccountingLedger;
use crate::accounting::memory::{InMemoryPlanRepository, InMemoryTransferRepository};
use crate::accounting::payout_factor::{PayoutFactorConfig, PayoutFactorService, WindowLengthConfig};
use crate::accounting::public_sector_fund::PublicSectorFundService;
use crate::accounting::repository::{PlanRepository, TransferRepository};

pub(super) const DEFAULT_COSTS: ProductionCosts = ProductionCosts {
    means_cost: Decimal::ONE,
    resource_cost: Decimal::ONE,
    labour_cost: Decimal::ONE,
};

pub(super) fn higher_costs() -> ProductionCosts {
    ProductionCosts::new(dec!(5), dec!(5), dec!(5))
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap()
}

pub(super) fn assert_approx_eq(
    actual: Decimal,
    expected: Decimal,
    context: impl std::fmt::Display,
) {
    let difference = (actual - expected).abs();
    assert!(
        difference < dec!(0.0000001),
        "{context}: expected {actual} to be approximately {expected}"
    );
}

/// Where a plan sits relative to the borders of the gliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PlanPosition {
    OutLeft,
    OutLeftOneHalf,
    Inside,
    OutRightOneHalf,
    OutRight,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct PlanConfig {
    pub position: PlanPosition,
    pub is_public: bool,
    pub costs: ProductionCosts,
}

impl PlanConfig {
    pub fn productive(position: PlanPosition) -> Self {
        Self {
            position,
            is_public: false,
            costs: DEFAULT_COSTS,
        }
    }

    pub fn public(position: PlanPosition) -> Self {
        Self {
            position,
            is_public: true,
            costs: DEFAULT_COSTS,
        }
    }

    pub fn with_costs(mut self, costs: ProductionCosts) -> Self {
        self.costs = costs;
        self
    }
}

pub(super) type MemoryPayoutFactorService =
    PayoutFactorService<InMemoryPlanRepository, WindowLengthConfig, FrozenClock>;

pub(super) type MemoryLedger = SocialAccountingLedger<
    InMemoryPlanRepository,
    InMemoryTransferRepository,
    WindowLengthConfig,
    FrozenClock,
>;

/// Services wired against in-memory stores and a clock frozen at [`now`].
pub(super) struct Economy {
    pub clock: Arc<FrozenClock>,
    pub config: Arc<WindowLengthConfig>,
    pub plans: Arc<InMemoryPlanRepository>,
    pub transfers: Arc<InMemoryTransferRepository>,
    pub social_accounting: SocialAccounting,
    pub payout_factor: Arc<MemoryPayoutFactorService>,
    pub ledger: MemoryLedger,
    planner: CompanyAccounts,
    member_count: AtomicUsize,
}

impl Economy {
    pub fn new() -> Self {
        let clock = Arc::new(FrozenClock::new(now()));
        let config = Arc::new(WindowLengthConfig::default());
        let plans = Arc::new(InMemoryPlanRepository::default());
        let transfers = Arc::new(InMemoryTransferRepository::default());
        let social_accounting = SocialAccounting::default();
        let payout_factor = Arc::new(PayoutFactorService::new(
            plans.clone(),
            config.clone(),
            clock.clone(),
        ));
        let ledger = SocialAccountingLedger::new(
            plans.clone(),
            transfers.clone(),
            payout_factor.clone(),
            clock.clone(),
            social_accounting.clone(),
        );

        Self {
            clock,
            config,
            plans,
            transfers,
            social_accounting,
            payout_factor,
            ledger,
            planner: CompanyAccounts::for_company("planner"),
            member_count: AtomicUsize::new(0),
        }
    }

    pub fn payout_factor(&self) -> Decimal {
        self.payout_factor
            .calculate_current_payout_factor()
            .expect("payout factor is computable")
    }

    pub fn psf_balance(&self) -> Decimal {
        PublicSectorFundService::new(self.transfers.clone(), self.social_accounting.clone())
            .calculate_psf_balance()
            .expect("psf balance is computable")
    }

    /// Approve a plan at the clock's current instant.
    pub fn create_plan(
        &self,
        timeframe_days: u32,
        is_public_service: bool,
        costs: ProductionCosts,
    ) -> Plan {
        self.ledger
            .approve_plan(
                PlanDraft {
                    name: "Plan".to_string(),
                    timeframe_days,
                    is_public_service,
                    production_costs: costs,
                },
                &self.planner,
            )
            .expect("plan approval succeeds")
    }

    /// Approve a plan placed at `config.position` relative to the current window.
    pub fn create_plan_at(&self, config: PlanConfig) -> Plan {
        self.clock.freeze_time(now());
        let window = i64::from(self.config.window_length_in_days());
        let (duration, start) = match config.position {
            PlanPosition::OutLeft => (window, now() - Duration::days(window * 3)),
            PlanPosition::OutLeftOneHalf => (window, now() - Duration::days(window)),
            PlanPosition::Inside => (window / 4, now()),
            PlanPosition::OutRightOneHalf => (window, now()),
            PlanPosition::OutRight => (window * 2, now() - Duration::days(window)),
        };
        self.clock.freeze_time(start);
        let timeframe = u32::try_from(duration).expect("timeframe fits u32");
        let plan = self.create_plan(timeframe, config.is_public, config.costs);
        self.clock.freeze_time(now());
        plan
    }

    /// Store an approved plan without booking its credits.
    pub fn insert_plan(&self, approval: Option<DateTime<Utc>>, timeframe_days: u32) -> Plan {
        self.plans
            .insert(Plan {
                id: PlanId::new(),
                name: "Imported".to_string(),
                approval_date: approval,
                timeframe_days,
                is_public_service: false,
                production_costs: DEFAULT_COSTS,
            })
            .expect("plan insert succeeds")
    }

    /// Productive labour of 100 hours next to a public plan claiming
    /// `100 * (1 - factor)` hours of means, so the payout factor equals `factor`.
    pub fn setup_environment_with_payout_factor(&self, factor: Decimal) {
        self.create_plan(
            14,
            false,
            ProductionCosts::new(Decimal::ZERO, Decimal::ZERO, dec!(100)),
        );
        self.create_plan(
            14,
            true,
            ProductionCosts::new(dec!(100) * (Decimal::ONE - factor), Decimal::ZERO, Decimal::ZERO),
        );
    }

    /// Register `hours` for a fresh member working at a fresh company.
    pub fn register_hours(&self, hours: Decimal) {
        let index = self.member_count.fetch_add(1, Ordering::Relaxed);
        let company = CompanyAccounts::for_company(&format!("company-{index}"));
        let worker = AccountId::new(format!("member-{index}"));
        self.ledger
            .register_hours_worked(&company, &worker, hours)
            .expect("registering hours succeeds");
    }

    /// Record a raw transfer at the current instant.
    pub fn transfer(
        &self,
        debit_account: AccountId,
        credit_account: AccountId,
        value: Decimal,
        transfer_type: TransferType,
    ) {
        self.transfers
            .record(Transfer {
                date: self.clock.now(),
                debit_account,
                credit_account,
                value,
                transfer_type,
            })
            .expect("transfer is recorded");
    }

    pub fn psf_account(&self) -> AccountId {
        self.social_accounting.account_psf.clone()
    }

    pub fn details_interactor(
        &self,
    ) -> PayoutFactorDetailsInteractor<InMemoryPlanRepository, WindowLengthConfig, FrozenClock> {
        PayoutFactorDetailsInteractor::new(self.payout_factor.clone())
    }

    pub fn window_details_interactor(
        &self,
    ) -> PayoutFactorWindowDetailsInteractor<InMemoryPlanRepository, WindowLengthConfig, FrozenClock>
    {
        PayoutFactorWindowDetailsInteractor::new(
            self.plans.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
    }

    pub fn psf_details_interactor(&self) -> PsfAccountDetailsInteractor<InMemoryTransferRepository> {
        PsfAccountDetailsInteractor::new(self.transfers.clone(), self.social_accounting.clone())
    }
}
