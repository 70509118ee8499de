use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use workers_control::accounting::details::{
    PayoutFactorDetails, PayoutFactorWindowDetails, PsfAccountDetails,
};
use workers_control::accounting::payout_factor::payout_factor_for;
use workers_control::accounting::{
    AccountingError, Clock, GlidingWindow, InMemoryPlanRepository, InMemoryTransferRepository,
    LedgerSnapshotImporter, PayoutFactorDetailsInteractor, PayoutFactorService,
    PayoutFactorWindowDetailsInteractor, Plan, PsfAccountDetailsInteractor, SocialAccounting,
    SystemClock, Transfer, WindowLengthConfig,
};
use workers_control::config::parse_window_length;
use workers_control::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) accounting: Arc<SnapshotAccounting<SystemClock>>,
}

/// Plans and transfers hydrated from CSV exports.
#[derive(Debug, Default)]
pub(crate) struct LedgerSnapshot {
    pub(crate) plans: Vec<Plan>,
    pub(crate) transfers: Vec<Transfer>,
}

impl LedgerSnapshot {
    pub(crate) fn load(
        plans_csv: Option<&Path>,
        transfers_csv: Option<&Path>,
    ) -> Result<Self, AppError> {
        let plans = match plans_csv {
            Some(path) => LedgerSnapshotImporter::plans_from_path(path)?,
            None => Vec::new(),
        };
        let transfers = match transfers_csv {
            Some(path) => LedgerSnapshotImporter::transfers_from_path(path)?,
            None => Vec::new(),
        };

        info!(
            plans = plans.len(),
            transfers = transfers.len(),
            "loaded ledger snapshot"
        );
        Ok(Self { plans, transfers })
    }
}

/// Payout factor with the window it was computed for.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PayoutFactorSummary {
    pub(crate) payout_factor: Decimal,
    pub(crate) window: GlidingWindow,
    pub(crate) plans_considered: usize,
}

type SnapshotPayoutFactorService<K> =
    PayoutFactorService<InMemoryPlanRepository, WindowLengthConfig, K>;

/// Accounting services wired against an in-memory ledger snapshot.
pub(crate) struct SnapshotAccounting<K> {
    plans: Arc<InMemoryPlanRepository>,
    transfers: Arc<InMemoryTransferRepository>,
    config: Arc<WindowLengthConfig>,
    clock: Arc<K>,
    social_accounting: SocialAccounting,
    payout_factor: Arc<SnapshotPayoutFactorService<K>>,
}

impl<K> SnapshotAccounting<K>
where
    K: Clock + 'static,
{
    pub(crate) fn new(snapshot: LedgerSnapshot, window_length_in_days: u32, clock: K) -> Self {
        let plans = Arc::new(InMemoryPlanRepository::with_plans(snapshot.plans));
        let transfers = Arc::new(InMemoryTransferRepository::with_transfers(snapshot.transfers));
        let config = Arc::new(WindowLengthConfig::new(window_length_in_days));
        let clock = Arc::new(clock);
        let payout_factor = Arc::new(PayoutFactorService::new(
            plans.clone(),
            config.clone(),
            clock.clone(),
        ));

        Self {
            plans,
            transfers,
            config,
            clock,
            social_accounting: SocialAccounting::default(),
            payout_factor,
        }
    }

    pub(crate) fn payout_factor(&self) -> Result<PayoutFactorSummary, AccountingError> {
        let window = self.payout_factor.current_window();
        let plans = self.payout_factor.plans_considered(&window)?;
        Ok(PayoutFactorSummary {
            payout_factor: payout_factor_for(&window, &plans)?,
            window,
            plans_considered: plans.len(),
        })
    }

    pub(crate) fn payout_factor_details(&self) -> Result<PayoutFactorDetails, AccountingError> {
        PayoutFactorDetailsInteractor::new(self.payout_factor.clone()).show_payout_factor_details()
    }

    pub(crate) fn payout_factor_window(&self) -> Result<PayoutFactorWindowDetails, AccountingError> {
        PayoutFactorWindowDetailsInteractor::new(
            self.plans.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .show_payout_factor_window_details()
    }

    pub(crate) fn psf_details(&self) -> Result<PsfAccountDetails, AccountingError> {
        PsfAccountDetailsInteractor::new(self.transfers.clone(), self.social_accounting.clone())
            .show_psf_account_details()
    }
}

pub(crate) fn parse_window_days(raw: &str) -> Result<u32, String> {
    parse_window_length(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}
