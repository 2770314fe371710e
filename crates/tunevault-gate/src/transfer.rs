//! Payment-transfer collaborator seam
//!
//! Withdrawals hand the escrowed amount to an external transfer channel.
//! The channel is fallible and non-idempotent; the ledger never retries,
//! it rolls the escrow back and surfaces the failure.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use tunevault_types::{AccountId, Amount, Result, TuneVaultError};

/// External payment-transfer collaborator
#[async_trait::async_trait]
pub trait PaymentTransfer: Send + Sync {
    /// Move `amount` to `to`. An `Err` means nothing was transferred.
    async fn transfer(&self, to: &AccountId, amount: Amount) -> Result<()>;
}

/// In-memory transfer channel that always succeeds and records payouts.
///
/// Useful for tests and local embedding; real deployments supply their own
/// channel over whatever rail they settle on.
#[derive(Default)]
pub struct InstantTransfer {
    payouts: Arc<RwLock<HashMap<AccountId, Amount>>>,
}

impl InstantTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total paid out to an account so far
    pub async fn paid_to(&self, account: &AccountId) -> Amount {
        self.payouts
            .read()
            .await
            .get(account)
            .copied()
            .unwrap_or_else(Amount::zero)
    }
}

#[async_trait::async_trait]
impl PaymentTransfer for InstantTransfer {
    async fn transfer(&self, to: &AccountId, amount: Amount) -> Result<()> {
        let mut payouts = self.payouts.write().await;
        let total = payouts.entry(to.clone()).or_insert_with(Amount::zero);
        *total = total
            .checked_add(amount)
            .ok_or(TuneVaultError::AmountOverflow)?;
        info!(to = %to, %amount, "payout transferred");
        Ok(())
    }
}
