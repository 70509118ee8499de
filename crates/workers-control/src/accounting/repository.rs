use chrono::{DateTime, Utc};

use super::domain::{AccountId, Plan, Transfer};

/// Filter handed to [`PlanRepository::plans`].
///
/// Built fluently, e.g. `PlanQuery::new().that_are_approved().that_will_expire_after(t)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanQuery {
    approved_only: bool,
    expires_after: Option<DateTime<Utc>>,
}

impl PlanQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn that_are_approved(mut self) -> Self {
        self.approved_only = true;
        self
    }

    /// Keep plans whose expiration lies strictly after `instant`.
    pub fn that_will_expire_after(mut self, instant: DateTime<Utc>) -> Self {
        self.expires_after = Some(instant);
        self
    }

    pub fn approved_only(&self) -> bool {
        self.approved_only
    }

    pub fn expires_after(&self) -> Option<DateTime<Utc>> {
        self.expires_after
    }

    /// Reference semantics for repositories that filter in memory.
    pub fn matches(&self, plan: &Plan) -> bool {
        if self.approved_only && !plan.is_approved() {
            return false;
        }
        match (self.expires_after, plan.approval_date) {
            // An expiration past the calendar's end lies after any threshold.
            (Some(threshold), Some(_)) => plan
                .expiration_date()
                .map_or(true, |expiration| expiration > threshold),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// Read access to production plans plus the insert used by plan approval.
pub trait PlanRepository: Send + Sync {
    fn plans(&self, query: &PlanQuery) -> Result<Vec<Plan>, RepositoryError>;
    fn insert(&self, plan: Plan) -> Result<Plan, RepositoryError>;
}

/// Transfer ledger access.
pub trait TransferRepository: Send + Sync {
    fn transfers_where_creditor(&self, account: &AccountId)
        -> Result<Vec<Transfer>, RepositoryError>;
    fn transfers_where_debtor(&self, account: &AccountId) -> Result<Vec<Transfer>, RepositoryError>;
    fn record(&self, transfer: Transfer) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
