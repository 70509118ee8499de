use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::domain::{SocialAccounting, Transfer};
use super::error::AccountingError;
use super::repository::TransferRepository;

/// Balance of the public sector fund over the complete transfer history.
pub struct PublicSectorFundService<T> {
    transfers: Arc<T>,
    social_accounting: SocialAccounting,
}

impl<T> PublicSectorFundService<T>
where
    T: TransferRepository + 'static,
{
    pub fn new(transfers: Arc<T>, social_accounting: SocialAccounting) -> Self {
        Self {
            transfers,
            social_accounting,
        }
    }

    pub fn social_accounting(&self) -> &SocialAccounting {
        &self.social_accounting
    }

    /// Credited minus debited value of the PSF account.
    pub fn calculate_psf_balance(&self) -> Result<Decimal, AccountingError> {
        let account = &self.social_accounting.account_psf;
        let inbound = self.transfers.transfers_where_creditor(account)?;
        let outbound = self.transfers.transfers_where_debtor(account)?;
        let balance = sum_values(&inbound) - sum_values(&outbound);
        debug!(
            inbound = inbound.len(),
            outbound = outbound.len(),
            %balance,
            "calculated psf balance"
        );
        Ok(balance)
    }
}

pub(crate) fn sum_values(transfers: &[Transfer]) -> Decimal {
    transfers.iter().map(|transfer| transfer.value).sum()
}
