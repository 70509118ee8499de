use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{AccountId, Plan, Transfer};
use super::repository::{PlanQuery, PlanRepository, RepositoryError, TransferRepository};

/// Plan store backed by a vector; used by the API service and the tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlanRepository {
    plans: Arc<Mutex<Vec<Plan>>>,
}

impl InMemoryPlanRepository {
    pub fn with_plans(plans: Vec<Plan>) -> Self {
        Self {
            plans: Arc::new(Mutex::new(plans)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Plan>>, RepositoryError> {
        self.plans
            .lock()
            .map_err(|_| RepositoryError::Unavailable("plan store lock poisoned".to_string()))
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn plans(&self, query: &PlanQuery) -> Result<Vec<Plan>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|plan| query.matches(plan))
            .cloned()
            .collect())
    }

    fn insert(&self, plan: Plan) -> Result<Plan, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == plan.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(plan.clone());
        Ok(plan)
    }
}

/// Append-only transfer ledger backed by a vector.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTransferRepository {
    transfers: Arc<Mutex<Vec<Transfer>>>,
}

impl InMemoryTransferRepository {
    pub fn with_transfers(transfers: Vec<Transfer>) -> Self {
        Self {
            transfers: Arc::new(Mutex::new(transfers)),
        }
    }

    pub fn all(&self) -> Result<Vec<Transfer>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Transfer>>, RepositoryError> {
        self.transfers
            .lock()
            .map_err(|_| RepositoryError::Unavailable("transfer store lock poisoned".to_string()))
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Transfer>, RepositoryError>
    where
        F: Fn(&Transfer) -> bool,
    {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|transfer| predicate(transfer))
            .cloned()
            .collect())
    }
}

impl TransferRepository for InMemoryTransferRepository {
    fn transfers_where_creditor(
        &self,
        account: &AccountId,
    ) -> Result<Vec<Transfer>, RepositoryError> {
        self.select(|transfer| &transfer.credit_account == account)
    }

    fn transfers_where_debtor(&self, account: &AccountId) -> Result<Vec<Transfer>, RepositoryError> {
        self.select(|transfer| &transfer.debit_account == account)
    }

    fn record(&self, transfer: Transfer) -> Result<(), RepositoryError> {
        self.lock()?.push(transfer);
        Ok(())
    }
}
