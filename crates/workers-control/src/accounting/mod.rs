//! Social accounting: payout factor, public sector fund and the ledger bookings
//! that feed them.
//!
//! Services are generic over their repositories, configuration and clock so the
//! API service can run them against CSV snapshots while the tests drive them with
//! in-memory stores and a frozen clock.

pub mod clock;
pub mod details;
pub mod domain;
pub mod error;
pub mod import;
pub mod ledger;
pub mod memory;
pub mod payout_factor;
pub mod public_sector_fund;
pub mod repository;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FrozenClock, SystemClock};
pub use details::{
    PayoutFactorDetailsInteractor, PayoutFactorWindowDetailsInteractor,
    PsfAccountDetailsInteractor,
};
pub use domain::{
    AccountId, CompanyAccounts, Plan, PlanDraft, PlanId, ProductionCosts, SocialAccounting,
    Transfer, TransferType,
};
pub use error::AccountingError;
pub use import::{LedgerSnapshotImporter, SnapshotImportError};
pub use ledger::SocialAccountingLedger;
pub use memory::{InMemoryPlanRepository, InMemoryTransferRepository};
pub use payout_factor::{GlidingWindow, PayoutFactorConfig, PayoutFactorService, WindowLengthConfig};
pub use public_sector_fund::PublicSectorFundService;
pub use repository::{PlanQuery, PlanRepository, RepositoryError, TransferRepository};
