//! TuneVault Access Gate
//!
//! One gate per work. A gate converts a one-time payment into a permanent,
//! non-transferable grant for a (work, consumer) pair and accumulates the
//! creator's royalty cut in escrow until explicitly withdrawn.
//!
//! # Invariants
//!
//! 1. A grant, once issued, is never revoked
//! 2. Settlement is all-or-nothing: escrow credit, grant insert, and the
//!    issued counter move together or not at all
//! 3. Escrow never goes negative and is never zeroed on a failed transfer
//! 4. The royalty cut is `floor(payment * bps / 10000)`; the remainder is
//!    not tracked here (its disposition belongs to the payment collaborator)

mod transfer;

pub use transfer::{InstantTransfer, PaymentTransfer};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tunevault_types::{AccountId, Amount, CreatorId, Result, TuneVaultError};

/// Default royalty rate: 3000 basis points = 30%
pub const DEFAULT_ROYALTY_BPS: u16 = 3000;

/// Outcome of an access request against a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessOutcome {
    /// The consumer holds a grant after this call
    pub granted: bool,
    /// This call performed a settlement (paid, escrow credited)
    pub settled: bool,
    /// Royalty credited to escrow by this call (zero on re-access)
    pub royalty: Amount,
}

/// Read-only snapshot of a gate's public fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateInfo {
    pub unit_price: Amount,
    pub owner: AccountId,
    pub owner_creator_id: CreatorId,
    pub escrow_balance: Amount,
    pub royalty_bps: u16,
    pub issued_count: u64,
    pub grant_count: usize,
}

/// Access gate bound to a single work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGate {
    unit_price: Amount,
    owner: AccountId,
    owner_creator_id: CreatorId,
    escrow_balance: Amount,
    royalty_bps: u16,
    granted_to: HashSet<AccountId>,
    issued_count: u64,
}

impl AccessGate {
    /// Create a gate with the default 30% royalty rate
    pub fn new(owner: AccountId, owner_creator_id: CreatorId, unit_price: Amount) -> Self {
        Self {
            unit_price,
            owner,
            owner_creator_id,
            escrow_balance: Amount::zero(),
            royalty_bps: DEFAULT_ROYALTY_BPS,
            granted_to: HashSet::new(),
            issued_count: 0,
        }
    }

    /// Create a gate with an explicit royalty rate in basis points
    pub fn with_royalty(
        owner: AccountId,
        owner_creator_id: CreatorId,
        unit_price: Amount,
        royalty_bps: u16,
    ) -> Result<Self> {
        if royalty_bps > tunevault_types::amount::MAX_BASIS_POINTS {
            return Err(TuneVaultError::InvalidRoyaltyRate { bps: royalty_bps });
        }
        let mut gate = Self::new(owner, owner_creator_id, unit_price);
        gate.royalty_bps = royalty_bps;
        Ok(gate)
    }

    pub fn has_grant(&self, consumer: &AccountId) -> bool {
        self.granted_to.contains(consumer)
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn escrow_balance(&self) -> Amount {
        self.escrow_balance
    }

    pub fn issued_count(&self) -> u64 {
        self.issued_count
    }

    /// Settle a payment into a grant.
    ///
    /// A consumer holding a grant gets access back immediately with no
    /// payment required and no state change. Otherwise the payment must
    /// cover the unit price; the royalty cut is credited to escrow, the
    /// grant inserted, and the issued counter bumped as one atomic step
    /// (all fallible arithmetic happens before any mutation).
    pub fn settle(&mut self, consumer: &AccountId, payment: Amount) -> Result<AccessOutcome> {
        if self.has_grant(consumer) {
            return Ok(AccessOutcome {
                granted: true,
                settled: false,
                royalty: Amount::zero(),
            });
        }

        if payment < self.unit_price {
            return Err(TuneVaultError::InsufficientPayment {
                required: self.unit_price.0,
                offered: payment.0,
            });
        }

        let royalty = payment
            .royalty_share(self.royalty_bps)
            .ok_or(TuneVaultError::InvalidRoyaltyRate {
                bps: self.royalty_bps,
            })?;
        let new_balance = self
            .escrow_balance
            .checked_add(royalty)
            .ok_or(TuneVaultError::AmountOverflow)?;

        self.escrow_balance = new_balance;
        self.granted_to.insert(consumer.clone());
        self.issued_count += 1;

        debug!(consumer = %consumer, %payment, %royalty, "access settled");
        Ok(AccessOutcome {
            granted: true,
            settled: true,
            royalty,
        })
    }

    /// First half of a withdrawal: zero the escrow and hand back the prior
    /// balance. The caller transfers the amount out and must call
    /// [`restore_escrow`](Self::restore_escrow) if that transfer fails.
    pub fn take_escrow(&mut self, caller: &AccountId) -> Result<Amount> {
        if caller != &self.owner {
            return Err(TuneVaultError::NotOwner {
                account: caller.0.clone(),
            });
        }
        if self.escrow_balance.is_zero() {
            return Err(TuneVaultError::NothingToWithdraw {
                account: caller.0.clone(),
            });
        }

        let amount = self.escrow_balance;
        self.escrow_balance = Amount::zero();
        Ok(amount)
    }

    /// Roll back a failed withdrawal, restoring the taken amount.
    pub fn restore_escrow(&mut self, amount: Amount) -> Result<()> {
        self.escrow_balance = self
            .escrow_balance
            .checked_add(amount)
            .ok_or(TuneVaultError::AmountOverflow)?;
        Ok(())
    }

    pub fn snapshot(&self) -> GateInfo {
        GateInfo {
            unit_price: self.unit_price,
            owner: self.owner.clone(),
            owner_creator_id: self.owner_creator_id,
            escrow_balance: self.escrow_balance,
            royalty_bps: self.royalty_bps,
            issued_count: self.issued_count,
            grant_count: self.granted_to.len(),
        }
    }
}
