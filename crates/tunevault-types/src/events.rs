//! Ledger events for observability and external indexing
//!
//! Events are broadcast to all subscribers; the ledger never depends on
//! anyone listening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, CreatorId, WorkId};

/// Events emitted by TuneVault ledger operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A creator registered and received a sequential id
    CreatorRegistered {
        creator_id: CreatorId,
        account: AccountId,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A consumer registered
    ConsumerRegistered {
        account: AccountId,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A work was published and its access gate created
    WorkPublished {
        work_id: WorkId,
        creator_id: CreatorId,
        title: String,
        unit_price: Amount,
        timestamp: DateTime<Utc>,
    },

    /// A payment settled and the royalty cut was credited to escrow
    RoyaltyAccrued {
        work_id: WorkId,
        consumer: AccountId,
        payment: Amount,
        royalty: Amount,
        timestamp: DateTime<Utc>,
    },

    /// A permanent access grant was issued
    GrantIssued {
        work_id: WorkId,
        consumer: AccountId,
        timestamp: DateTime<Utc>,
    },

    /// Escrow was withdrawn and paid out to the work's creator
    RoyaltyPaid {
        work_id: WorkId,
        creator: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// A playback was recorded
    Played {
        work_id: WorkId,
        consumer: AccountId,
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::CreatorRegistered { timestamp, .. } => *timestamp,
            LedgerEvent::ConsumerRegistered { timestamp, .. } => *timestamp,
            LedgerEvent::WorkPublished { timestamp, .. } => *timestamp,
            LedgerEvent::RoyaltyAccrued { timestamp, .. } => *timestamp,
            LedgerEvent::GrantIssued { timestamp, .. } => *timestamp,
            LedgerEvent::RoyaltyPaid { timestamp, .. } => *timestamp,
            LedgerEvent::Played { timestamp, .. } => *timestamp,
        }
    }

    /// Get a short description for logging
    pub fn summary(&self) -> String {
        match self {
            LedgerEvent::CreatorRegistered { creator_id, name, .. } => {
                format!("Creator registered: {} ({})", name, creator_id)
            }
            LedgerEvent::ConsumerRegistered { account, name, .. } => {
                format!("Consumer registered: {} ({})", name, account)
            }
            LedgerEvent::WorkPublished { work_id, title, unit_price, .. } => {
                format!("Published {}: \"{}\" at {}", work_id, title, unit_price)
            }
            LedgerEvent::RoyaltyAccrued { work_id, payment, royalty, .. } => {
                format!("Royalty accrued on {}: {} of {}", work_id, royalty, payment)
            }
            LedgerEvent::GrantIssued { work_id, consumer, .. } => {
                format!("Grant issued: {} -> {}", work_id, consumer)
            }
            LedgerEvent::RoyaltyPaid { work_id, creator, amount, .. } => {
                format!("Royalty paid for {}: {} to {}", work_id, amount, creator)
            }
            LedgerEvent::Played { work_id, consumer, .. } => {
                format!("Played: {} by {}", work_id, consumer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization() {
        let event = LedgerEvent::RoyaltyAccrued {
            work_id: WorkId(1),
            consumer: AccountId::from("bob"),
            payment: Amount::new(1000),
            royalty: Amount::new(300),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RoyaltyAccrued"));
        assert!(json.contains("bob"));

        let back: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary(), event.summary());
    }

    #[test]
    fn event_summary() {
        let event = LedgerEvent::RoyaltyPaid {
            work_id: WorkId(3),
            creator: AccountId::from("alice"),
            amount: Amount::new(4500),
            timestamp: Utc::now(),
        };

        let summary = event.summary();
        assert!(summary.contains("work_3"));
        assert!(summary.contains("$45.00"));
        assert!(summary.contains("alice"));
    }
}
