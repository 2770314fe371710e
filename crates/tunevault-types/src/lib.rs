//! Canonical types for TuneVault
//!
//! These types form the foundation of all TuneVault operations:
//! identities, amounts, errors, and the event vocabulary.

pub mod amount;
pub mod error;
pub mod events;
pub mod identity;

pub use amount::Amount;
pub use error::{Result, TuneVaultError};
pub use events::LedgerEvent;
pub use identity::{AccountId, CreatorId, WorkId};
