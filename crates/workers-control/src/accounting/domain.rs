use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier wrapper for production plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanId(pub Uuid);

impl PlanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier wrapper for ledger accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Planned costs of a production plan, in labour hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductionCosts {
    pub means_cost: Decimal,
    pub resource_cost: Decimal,
    pub labour_cost: Decimal,
}

impl ProductionCosts {
    pub fn new(means_cost: Decimal, resource_cost: Decimal, labour_cost: Decimal) -> Self {
        Self {
            means_cost,
            resource_cost,
            labour_cost,
        }
    }

    pub fn total(&self) -> Decimal {
        self.means_cost + self.resource_cost + self.labour_cost
    }

    /// Every component multiplied by `factor`.
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            means_cost: self.means_cost * factor,
            resource_cost: self.resource_cost * factor,
            labour_cost: self.labour_cost * factor,
        }
    }
}

/// Longest plan timeframe accepted by approval and import.
pub const MAX_PLAN_TIMEFRAME_DAYS: u32 = 36_500;

/// Production plan as stored by the planning records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub approval_date: Option<DateTime<Utc>>,
    pub timeframe_days: u32,
    pub is_public_service: bool,
    pub production_costs: ProductionCosts,
}

impl Plan {
    pub fn is_approved(&self) -> bool {
        self.approval_date.is_some()
    }

    /// `None` for unapproved plans and for timeframes past the calendar's end.
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.approval_date?
            .checked_add_signed(Duration::days(i64::from(self.timeframe_days)))
    }

    /// Approval and expiration instants, present only for approved plans.
    pub fn lifetime(&self) -> Option<PlanLifetime> {
        let approval = self.approval_date?;
        let expiration = self.expiration_date()?;
        Some(PlanLifetime {
            approval,
            expiration,
        })
    }
}

/// Closed-open interval during which an approved plan is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLifetime {
    pub approval: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

/// Plan contents submitted for approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDraft {
    pub name: String,
    pub timeframe_days: u32,
    pub is_public_service: bool,
    pub production_costs: ProductionCosts,
}

/// Reason a transfer was booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    CreditP,
    CreditR,
    CreditA,
    CreditPublicP,
    CreditPublicR,
    CreditPublicA,
    WorkCertificates,
    Taxes,
}

impl TransferType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditP => "credit_p",
            Self::CreditR => "credit_r",
            Self::CreditA => "credit_a",
            Self::CreditPublicP => "credit_public_p",
            Self::CreditPublicR => "credit_public_r",
            Self::CreditPublicA => "credit_public_a",
            Self::WorkCertificates => "work_certificates",
            Self::Taxes => "taxes",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        [
            Self::CreditP,
            Self::CreditR,
            Self::CreditA,
            Self::CreditPublicP,
            Self::CreditPublicR,
            Self::CreditPublicA,
            Self::WorkCertificates,
            Self::Taxes,
        ]
        .into_iter()
        .find(|kind| kind.label() == normalized)
    }
}

/// Booked movement of value from the debit account to the credit account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub date: DateTime<Utc>,
    pub debit_account: AccountId,
    pub credit_account: AccountId,
    pub value: Decimal,
    pub transfer_type: TransferType,
}

/// System accounts owned by social accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccounting {
    pub account_psf: AccountId,
    pub account_p: AccountId,
    pub account_r: AccountId,
    pub account_a: AccountId,
}

impl Default for SocialAccounting {
    fn default() -> Self {
        Self {
            account_psf: AccountId::new("social-accounting:psf"),
            account_p: AccountId::new("social-accounting:p"),
            account_r: AccountId::new("social-accounting:r"),
            account_a: AccountId::new("social-accounting:a"),
        }
    }
}

/// Accounts held by a planning company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyAccounts {
    pub means: AccountId,
    pub resources: AccountId,
    pub labour: AccountId,
    pub products: AccountId,
}

impl CompanyAccounts {
    /// Derive the four company accounts from a short company key.
    pub fn for_company(key: &str) -> Self {
        Self {
            means: AccountId::new(format!("{key}:means")),
            resources: AccountId::new(format!("{key}:resources")),
            labour: AccountId::new(format!("{key}:labour")),
            products: AccountId::new(format!("{key}:products")),
        }
    }
}
