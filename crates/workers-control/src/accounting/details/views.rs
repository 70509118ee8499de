use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounting::domain::{PlanId, TransferType};
use crate::accounting::payout_factor::GlidingWindow;

#[derive(Debug, Clone, Serialize)]
pub struct PayoutFactorDetails {
    pub payout_factor: Decimal,
    pub window_center: DateTime<Utc>,
    pub window_size_in_days: u32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub plans: Vec<PlanCoverageView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanCoverageView {
    pub id: PlanId,
    pub name: String,
    pub approval_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub is_public_service: bool,
    pub timeframe: u32,
    pub coverage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayoutFactorWindowDetails {
    pub window_center: DateTime<Utc>,
    pub window_size_in_days: u32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub plans: Vec<WindowPlanView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowPlanView {
    pub id: PlanId,
    pub approval_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub is_public_service: bool,
    pub timeframe: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PsfAccountDetails {
    pub account_balance: Decimal,
    pub transfers: Vec<AccountTransferView>,
}

/// Transfer as seen from one account; `volume` is negative when the account was debited.
#[derive(Debug, Clone, Serialize)]
pub struct AccountTransferView {
    pub date: DateTime<Utc>,
    pub transfer_type: TransferType,
    pub transfer_type_label: &'static str,
    pub volume: Decimal,
}

impl PayoutFactorWindowDetails {
    pub(crate) fn new(window: &GlidingWindow, plans: Vec<WindowPlanView>) -> Self {
        Self {
            window_center: window.center,
            window_size_in_days: window.size_in_days,
            window_start: window.start,
            window_end: window.end,
            plans,
        }
    }
}
