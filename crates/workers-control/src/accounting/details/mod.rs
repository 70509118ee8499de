//! Read models combining the payout factor and fund services with their inputs.

mod payout_factor;
mod psf_account;
pub mod views;

pub use payout_factor::{PayoutFactorDetailsInteractor, PayoutFactorWindowDetailsInteractor};
pub use psf_account::PsfAccountDetailsInteractor;
pub use views::{
    AccountTransferView, PayoutFactorDetails, PayoutFactorWindowDetails, PlanCoverageView,
    PsfAccountDetails, WindowPlanView,
};
