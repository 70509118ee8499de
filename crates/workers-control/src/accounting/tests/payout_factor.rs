use super::common::*;
use crate::accounting::clock::FrozenClock;
use crate::accounting::domain::{Plan, PlanId};
use crate::accounting::error::AccountingError;
use crate::accounting::payout_factor::{PayoutFactorService, WindowLengthConfig};
use crate::accounting::repository::{PlanQuery, PlanRepository, RepositoryError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use PlanPosition::*;

#[test]
fn payout_factor_is_one_without_plans() {
    let economy = Economy::new();
    assert_eq!(economy.payout_factor(), Decimal::ONE);
}

#[test]
fn payout_factor_with_one_plan() {
    let cases = [
        (PlanConfig::productive(OutLeft), Decimal::ONE),
        (PlanConfig::public(OutLeft), Decimal::ONE),
        (PlanConfig::productive(OutLeftOneHalf), Decimal::ONE),
        (PlanConfig::public(OutLeftOneHalf), Decimal::ZERO),
        (PlanConfig::productive(Inside), Decimal::ONE),
        (PlanConfig::public(Inside), Decimal::ZERO),
        (PlanConfig::productive(OutRightOneHalf), Decimal::ONE),
        (PlanConfig::public(OutRightOneHalf), Decimal::ZERO),
        (PlanConfig::productive(OutRight), Decimal::ONE),
        (PlanConfig::public(OutRight), Decimal::ZERO),
    ];

    for (plan, expected) in cases {
        let economy = Economy::new();
        economy.create_plan_at(plan);
        let factor = economy.payout_factor();
        assert_eq!(factor, expected, "unexpected payout factor for {plan:?}");
    }
}

#[test]
fn payout_factor_with_one_productive_and_one_public_plan() {
    let higher = higher_costs();
    let cases = [
        // productive plan left out
        (PlanConfig::productive(OutLeft), PlanConfig::public(OutLeft), Decimal::ONE),
        (PlanConfig::productive(OutLeft), PlanConfig::public(OutLeftOneHalf), Decimal::ZERO),
        (PlanConfig::productive(OutLeft), PlanConfig::public(Inside), Decimal::ZERO),
        (PlanConfig::productive(OutLeft), PlanConfig::public(OutRightOneHalf), Decimal::ZERO),
        (PlanConfig::public(OutLeft), PlanConfig::productive(OutLeftOneHalf), Decimal::ONE),
        (PlanConfig::public(OutLeft), PlanConfig::productive(Inside), Decimal::ONE),
        (PlanConfig::public(OutLeft), PlanConfig::productive(OutRightOneHalf), Decimal::ONE),
        // first plan half out on the left, same costs
        (PlanConfig::productive(OutLeftOneHalf), PlanConfig::public(OutLeftOneHalf), Decimal::ZERO),
        (PlanConfig::productive(OutLeftOneHalf), PlanConfig::public(Inside), Decimal::ZERO),
        (PlanConfig::productive(OutLeftOneHalf), PlanConfig::public(OutRightOneHalf), Decimal::ZERO),
        (PlanConfig::public(OutLeftOneHalf), PlanConfig::productive(Inside), Decimal::ZERO),
        (PlanConfig::public(OutLeftOneHalf), PlanConfig::productive(OutRightOneHalf), Decimal::ZERO),
        // productive plan with higher costs
        (
            PlanConfig::productive(OutLeftOneHalf).with_costs(higher),
            PlanConfig::public(OutLeftOneHalf),
            dec!(0.5),
        ),
        (
            PlanConfig::productive(OutLeftOneHalf).with_costs(higher),
            PlanConfig::public(Inside),
            dec!(1) / dec!(7),
        ),
        (
            PlanConfig::productive(OutLeftOneHalf).with_costs(higher),
            PlanConfig::public(OutRightOneHalf),
            dec!(0.5),
        ),
        (
            PlanConfig::public(OutLeftOneHalf),
            PlanConfig::productive(Inside).with_costs(higher),
            dec!(4) / dec!(5.5),
        ),
        (
            PlanConfig::public(OutLeftOneHalf),
            PlanConfig::productive(OutRightOneHalf).with_costs(higher),
            dec!(0.5),
        ),
        // first plan inside, same costs
        (PlanConfig::productive(Inside), PlanConfig::public(Inside), Decimal::ZERO),
        (PlanConfig::productive(Inside), PlanConfig::public(OutRightOneHalf), Decimal::ZERO),
        (PlanConfig::public(Inside), PlanConfig::productive(OutRightOneHalf), Decimal::ZERO),
        // productive plan with higher costs
        (
            PlanConfig::productive(Inside).with_costs(higher),
            PlanConfig::public(Inside),
            dec!(0.5),
        ),
        (
            PlanConfig::productive(Inside).with_costs(higher),
            PlanConfig::public(OutRightOneHalf),
            dec!(4) / dec!(5.5),
        ),
        (
            PlanConfig::public(Inside),
            PlanConfig::productive(OutRightOneHalf).with_costs(higher),
            dec!(1) / dec!(7),
        ),
        // both plans half out on the right
        (
            PlanConfig::productive(OutRightOneHalf),
            PlanConfig::public(OutRightOneHalf),
            Decimal::ZERO,
        ),
        (
            PlanConfig::productive(OutRightOneHalf).with_costs(higher),
            PlanConfig::public(OutRightOneHalf),
            dec!(0.5),
        ),
    ];

    for (first, second, expected) in cases {
        let economy = Economy::new();
        economy.create_plan_at(first);
        economy.create_plan_at(second);
        assert_approx_eq(
            economy.payout_factor(),
            expected,
            format_args!("{first:?} + {second:?}"),
        );
    }
}

#[test]
fn factor_decreases_with_window_size_when_public_plan_lasts_longer() {
    let economy = Economy::new();
    economy.create_plan(1, false, higher_costs());
    economy.create_plan(10, true, DEFAULT_COSTS);

    economy.config.set_window_length(2);
    let short_window = economy.payout_factor();
    economy.config.set_window_length(10);
    let long_window = economy.payout_factor();

    assert!(long_window < short_window, "{long_window} !< {short_window}");
}

#[test]
fn factor_increases_with_window_size_when_productive_plan_lasts_longer() {
    let economy = Economy::new();
    economy.create_plan(10, false, higher_costs());
    economy.create_plan(1, true, DEFAULT_COSTS);

    economy.config.set_window_length(2);
    let short_window = economy.payout_factor();
    economy.config.set_window_length(10);
    let long_window = economy.payout_factor();

    assert!(long_window > short_window, "{long_window} !> {short_window}");
}

#[test]
fn unapproved_plans_are_ignored() {
    let economy = Economy::new();
    economy.insert_plan(None, 30);
    economy.create_plan(30, true, DEFAULT_COSTS);
    economy.insert_plan(None, 30);

    assert_eq!(economy.payout_factor(), Decimal::ZERO);
}

#[test]
fn environment_fixture_produces_the_requested_factor() {
    for factor in [dec!(0), dec!(0.1), dec!(0.5), dec!(0.8), dec!(1)] {
        let economy = Economy::new();
        economy.setup_environment_with_payout_factor(factor);
        assert_approx_eq(economy.payout_factor(), factor, format_args!("factor {factor}"));
    }
}

struct IgnoresApprovalFilter;

impl PlanRepository for IgnoresApprovalFilter {
    fn plans(&self, _query: &PlanQuery) -> Result<Vec<Plan>, RepositoryError> {
        Ok(vec![Plan {
            id: PlanId::new(),
            name: "Draft".to_string(),
            approval_date: None,
            timeframe_days: 10,
            is_public_service: false,
            production_costs: DEFAULT_COSTS,
        }])
    }

    fn insert(&self, plan: Plan) -> Result<Plan, RepositoryError> {
        Ok(plan)
    }
}

struct OfflineRepository;

impl PlanRepository for OfflineRepository {
    fn plans(&self, _query: &PlanQuery) -> Result<Vec<Plan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _plan: Plan) -> Result<Plan, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[test]
fn unapproved_plan_from_repository_is_reported() {
    let service = PayoutFactorService::new(
        Arc::new(IgnoresApprovalFilter),
        Arc::new(WindowLengthConfig::default()),
        Arc::new(FrozenClock::new(now())),
    );

    match service.calculate_current_payout_factor() {
        Err(AccountingError::PlanNotApproved(_)) => {}
        other => panic!("expected unapproved plan error, got {other:?}"),
    }
}

#[test]
fn repository_failures_propagate() {
    let service = PayoutFactorService::new(
        Arc::new(OfflineRepository),
        Arc::new(WindowLengthConfig::default()),
        Arc::new(FrozenClock::new(now())),
    );

    match service.calculate_current_payout_factor() {
        Err(AccountingError::Repository(RepositoryError::Unavailable(message))) => {
            assert_eq!(message, "database offline")
        }
        other => panic!("expected repository error, got {other:?}"),
    }
}

#[test]
fn plan_expiring_past_the_calendar_is_reported() {
    let economy = Economy::new();
    let plan = economy.insert_plan(Some(now()), u32::MAX);

    match economy.payout_factor.calculate_current_payout_factor() {
        Err(AccountingError::TimeframeOutOfRange(id, days)) => {
            assert_eq!(id, plan.id);
            assert_eq!(days, u32::MAX);
        }
        other => panic!("expected out of range timeframe, got {other:?}"),
    }
}

#[test]
fn window_longer_than_the_calendar_still_yields_a_factor() {
    let economy = Economy::new();
    economy.create_plan(14, false, DEFAULT_COSTS);
    economy.config.set_window_length(u32::MAX);

    let window = economy.payout_factor.current_window();
    assert_eq!(window.start, chrono::DateTime::<chrono::Utc>::MIN_UTC);
    assert_eq!(economy.payout_factor(), Decimal::ONE);
}
