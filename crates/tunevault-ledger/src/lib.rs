//! TuneVault Streaming Ledger
//!
//! Top-level orchestrator composing the identity registry, the catalog,
//! and per-work access gates. Every public operation executes as an
//! indivisible unit behind a single `RwLock` per ledger instance, since
//! the invariants span multiple records (work + gate, escrow + grant).
//!
//! # Invariants
//!
//! 1. `stream` is the single write path combining access control and usage
//!    metering: access granted AND play recorded, or neither
//! 2. Failure paths are checked before any mutation; the payment transfer
//!    is the one mutate-then-rollback exception
//! 3. Escrow is never left zeroed after a failed transfer

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use tunevault_catalog::{Catalog, Work};
use tunevault_gate::{GateInfo, PaymentTransfer, DEFAULT_ROYALTY_BPS};
use tunevault_registry::IdentityRegistry;
use tunevault_types::{
    AccountId, Amount, CreatorId, LedgerEvent, Result, TuneVaultError, WorkId,
};

/// Everything the single lock protects
#[derive(Default)]
struct LedgerState {
    registry: IdentityRegistry,
    catalog: Catalog,
    // Append-only play history per consumer, in play order
    play_history: HashMap<AccountId, Vec<WorkId>>,
}

/// Aggregate counters for dashboards and status endpoints
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LedgerSummary {
    pub creator_count: usize,
    pub consumer_count: usize,
    pub work_count: usize,
    pub total_plays: u64,
}

/// The TuneVault streaming ledger
///
/// Thread-safe and designed for concurrent callers; clone freely, all
/// clones share the same state and event bus.
#[derive(Clone)]
pub struct StreamingLedger {
    state: Arc<RwLock<LedgerState>>,
    transfer: Arc<dyn PaymentTransfer>,
    events: broadcast::Sender<LedgerEvent>,
}

impl StreamingLedger {
    /// Create a ledger wired to the given payment-transfer channel
    pub fn new(transfer: Arc<dyn PaymentTransfer>) -> Self {
        let (events, _) = broadcast::channel(1024);
        Self {
            state: Arc::new(RwLock::new(LedgerState::default())),
            transfer,
            events,
        }
    }

    /// Subscribe to ledger events
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: LedgerEvent) {
        // Ignore send errors (no receivers)
        let _ = self.events.send(event);
    }

    /// Register a creator, assigning the next sequential creator id
    pub async fn register_creator(
        &self,
        account: AccountId,
        name: impl Into<String> + Send,
        profile_ref: impl Into<String> + Send,
    ) -> Result<CreatorId> {
        let name = name.into();
        let creator_id = {
            let mut state = self.state.write().await;
            state
                .registry
                .register_creator(account.clone(), name.clone(), profile_ref)?
        };
        self.emit(LedgerEvent::CreatorRegistered {
            creator_id,
            account,
            name,
            timestamp: Utc::now(),
        });
        Ok(creator_id)
    }

    /// Register a consumer
    pub async fn register_consumer(
        &self,
        account: AccountId,
        name: impl Into<String> + Send,
        profile_ref: impl Into<String> + Send,
    ) -> Result<()> {
        let name = name.into();
        {
            let mut state = self.state.write().await;
            state
                .registry
                .register_consumer(account.clone(), name.clone(), profile_ref)?;
        }
        self.emit(LedgerEvent::ConsumerRegistered {
            account,
            name,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Publish a work with the default 30% royalty rate
    pub async fn publish(
        &self,
        creator: AccountId,
        title: impl Into<String> + Send,
        audio_ref: impl Into<String> + Send,
        cover_ref: impl Into<String> + Send,
        unit_price: Amount,
    ) -> Result<WorkId> {
        self.publish_with_royalty(creator, title, audio_ref, cover_ref, unit_price, DEFAULT_ROYALTY_BPS)
            .await
    }

    /// Publish a work with an explicit royalty rate in basis points
    pub async fn publish_with_royalty(
        &self,
        creator: AccountId,
        title: impl Into<String> + Send,
        audio_ref: impl Into<String> + Send,
        cover_ref: impl Into<String> + Send,
        unit_price: Amount,
        royalty_bps: u16,
    ) -> Result<WorkId> {
        let title = title.into();
        let (work_id, creator_id) = {
            let mut state = self.state.write().await;
            let creator_id = state
                .registry
                .creator(&creator)
                .map(|c| c.id)
                .ok_or_else(|| TuneVaultError::NotRegisteredCreator {
                    account: creator.0.clone(),
                })?;
            let work_id = state.catalog.publish(
                creator,
                creator_id,
                title.clone(),
                audio_ref,
                cover_ref,
                unit_price,
                royalty_bps,
            )?;
            (work_id, creator_id)
        };
        self.emit(LedgerEvent::WorkPublished {
            work_id,
            creator_id,
            title,
            unit_price,
            timestamp: Utc::now(),
        });
        Ok(work_id)
    }

    /// Request playback of a work.
    ///
    /// First-time access settles the payment through the work's gate;
    /// repeat access is free. On success the play count is incremented and
    /// the play appended to the consumer's history in the same atomic step,
    /// and the work's audio reference is returned. On failure nothing
    /// changes.
    pub async fn stream(
        &self,
        consumer: AccountId,
        work_id: WorkId,
        payment: Amount,
    ) -> Result<String> {
        let (audio_ref, outcome) = {
            let mut state = self.state.write().await;
            let work = state.catalog.work_mut(work_id)?;
            let outcome = work.gate.settle(&consumer, payment)?;
            work.play_count += 1;
            let audio_ref = work.audio_ref.clone();
            state
                .play_history
                .entry(consumer.clone())
                .or_default()
                .push(work_id);
            (audio_ref, outcome)
        };

        if outcome.settled {
            self.emit(LedgerEvent::RoyaltyAccrued {
                work_id,
                consumer: consumer.clone(),
                payment,
                royalty: outcome.royalty,
                timestamp: Utc::now(),
            });
            self.emit(LedgerEvent::GrantIssued {
                work_id,
                consumer: consumer.clone(),
                timestamp: Utc::now(),
            });
        }
        self.emit(LedgerEvent::Played {
            work_id,
            consumer: consumer.clone(),
            timestamp: Utc::now(),
        });

        info!(work = %work_id, consumer = %consumer, settled = outcome.settled, "played");
        Ok(audio_ref)
    }

    /// Withdraw a work's accrued royalties to its creator.
    ///
    /// The escrow is zeroed, then the amount handed to the transfer
    /// channel. If the channel fails, the balance is restored before the
    /// error surfaces; the write guard is held across the await so no other
    /// operation can observe the zeroed escrow.
    pub async fn withdraw_escrow(&self, caller: AccountId, work_id: WorkId) -> Result<Amount> {
        let mut state = self.state.write().await;
        let work = state.catalog.work_mut(work_id)?;
        let amount = work.gate.take_escrow(&caller)?;
        let creator = work.gate.owner().clone();

        match self.transfer.transfer(&creator, amount).await {
            Ok(()) => {
                info!(work = %work_id, creator = %creator, %amount, "royalty paid out");
                self.emit(LedgerEvent::RoyaltyPaid {
                    work_id,
                    creator,
                    amount,
                    timestamp: Utc::now(),
                });
                Ok(amount)
            }
            Err(e) => {
                work.gate.restore_escrow(amount)?;
                warn!(work = %work_id, %amount, error = %e, "transfer failed, escrow restored");
                let reason = match e {
                    TuneVaultError::TransferFailed { reason } => reason,
                    other => other.to_string(),
                };
                Err(TuneVaultError::TransferFailed { reason })
            }
        }
    }

    /// Get a work by id
    pub async fn work(&self, work_id: WorkId) -> Result<Work> {
        let state = self.state.read().await;
        state.catalog.work(work_id).cloned()
    }

    /// All works in publication order
    pub async fn all_works(&self) -> Vec<Work> {
        let state = self.state.read().await;
        state.catalog.list_all().into_iter().cloned().collect()
    }

    /// A creator's works in publication order
    pub async fn works_by_creator(&self, creator: &AccountId) -> Vec<Work> {
        let state = self.state.read().await;
        state
            .catalog
            .list_by_creator(creator)
            .into_iter()
            .cloned()
            .collect()
    }

    /// A consumer's plays, oldest first
    pub async fn play_history(&self, consumer: &AccountId) -> Vec<WorkId> {
        let state = self.state.read().await;
        state
            .play_history
            .get(consumer)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of a work's gate
    pub async fn gate_info(&self, work_id: WorkId) -> Result<GateInfo> {
        let state = self.state.read().await;
        Ok(state.catalog.work(work_id)?.gate.snapshot())
    }

    /// Aggregate counters
    pub async fn summary(&self) -> LedgerSummary {
        let state = self.state.read().await;
        LedgerSummary {
            creator_count: state.registry.creator_count(),
            consumer_count: state.registry.consumer_count(),
            work_count: state.catalog.work_count(),
            total_plays: state.catalog.list_all().iter().map(|w| w.play_count).sum(),
        }
    }
}
