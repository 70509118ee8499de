use std::cmp::Reverse;
use std::sync::Arc;

use super::views::{AccountTransferView, PsfAccountDetails};
use crate::accounting::domain::{SocialAccounting, Transfer};
use crate::accounting::error::AccountingError;
use crate::accounting::public_sector_fund::PublicSectorFundService;
use crate::accounting::repository::TransferRepository;

/// Balance and transfer history of the public sector fund account.
pub struct PsfAccountDetailsInteractor<T> {
    transfers: Arc<T>,
    fund: PublicSectorFundService<T>,
}

impl<T> PsfAccountDetailsInteractor<T>
where
    T: TransferRepository + 'static,
{
    pub fn new(transfers: Arc<T>, social_accounting: SocialAccounting) -> Self {
        let fund = PublicSectorFundService::new(transfers.clone(), social_accounting);
        Self { transfers, fund }
    }

    /// Newest transfers first.
    pub fn show_psf_account_details(&self) -> Result<PsfAccountDetails, AccountingError> {
        let account = &self.fund.social_accounting().account_psf;
        let inbound = self.transfers.transfers_where_creditor(account)?;
        let outbound = self.transfers.transfers_where_debtor(account)?;

        let mut transfers: Vec<AccountTransferView> = inbound
            .into_iter()
            .map(|transfer| view(transfer, false))
            .chain(outbound.into_iter().map(|transfer| view(transfer, true)))
            .collect();
        transfers.sort_by_key(|transfer| Reverse(transfer.date));

        Ok(PsfAccountDetails {
            account_balance: self.fund.calculate_psf_balance()?,
            transfers,
        })
    }
}

fn view(transfer: Transfer, debited: bool) -> AccountTransferView {
    let volume = if debited {
        -transfer.value
    } else {
        transfer.value
    };
    AccountTransferView {
        date: transfer.date,
        transfer_type: transfer.transfer_type,
        transfer_type_label: transfer.transfer_type.label(),
        volume,
    }
}
