//! Error types for TuneVault
//!
//! Every failure is a named precondition the caller can inspect. No
//! operation partially applies its effects on failure; the transfer step is
//! the single mutate-then-rollback exception and surfaces as
//! `TransferFailed` after the rollback has already happened.

use thiserror::Error;

/// Result type for TuneVault operations
pub type Result<T> = std::result::Result<T, TuneVaultError>;

/// TuneVault error types
#[derive(Debug, Clone, Error)]
pub enum TuneVaultError {
    /// Identity already holds a record in the target namespace
    #[error("Account {account} is already registered")]
    AlreadyRegistered { account: String },

    /// Publishing requires a prior creator registration
    #[error("Account {account} is not a registered creator")]
    NotRegisteredCreator { account: String },

    /// Work id is 0 or was never assigned
    #[error("Work {work_id} not found")]
    WorkNotFound { work_id: u64 },

    /// Payment below the gate's unit price and no prior grant
    #[error("Insufficient payment: required {required}, offered {offered}")]
    InsufficientPayment { required: u64, offered: u64 },

    /// Caller does not own the gate's escrow
    #[error("Account {account} does not own this work's escrow")]
    NotOwner { account: String },

    /// Withdrawal with a zero escrow balance fails, it is not a no-op
    #[error("Nothing to withdraw for account {account}")]
    NothingToWithdraw { account: String },

    /// The payment-transfer collaborator rejected the payout; escrow was
    /// restored before this error was surfaced
    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Amount arithmetic overflow
    #[error("Amount overflow during arithmetic operation")]
    AmountOverflow,

    /// Royalty rate outside [0, 10000] basis points
    #[error("Invalid royalty rate: {bps} basis points")]
    InvalidRoyaltyRate { bps: u16 },
}

impl TuneVaultError {
    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            Self::NotRegisteredCreator { .. } => "NOT_REGISTERED_CREATOR",
            Self::WorkNotFound { .. } => "WORK_NOT_FOUND",
            Self::InsufficientPayment { .. } => "INSUFFICIENT_PAYMENT",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::NothingToWithdraw { .. } => "NOTHING_TO_WITHDRAW",
            Self::TransferFailed { .. } => "TRANSFER_FAILED",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::InvalidRoyaltyRate { .. } => "INVALID_ROYALTY_RATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let err = TuneVaultError::InsufficientPayment {
            required: 1000,
            offered: 500,
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_PAYMENT");
    }

    #[test]
    fn error_messages_carry_context() {
        let err = TuneVaultError::NotRegisteredCreator {
            account: "alice".to_string(),
        };
        assert!(err.to_string().contains("alice"));
    }
}
