//! TuneVault Catalog
//!
//! Stores published works. Work ids come from a single monotonically
//! increasing counter shared across all works; the counter pre-increments
//! so id 0 (the "does not exist" sentinel) is never issued. Each work owns
//! its access gate; the gate is created atomically with the work and never
//! outlives it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use tunevault_gate::AccessGate;
use tunevault_types::{AccountId, Amount, CreatorId, Result, TuneVaultError, WorkId};

/// A published work and its owned access gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub creator_id: CreatorId,
    pub creator: AccountId,
    pub title: String,
    pub audio_ref: String,
    pub cover_ref: String,
    pub play_count: u64,
    pub gate: AccessGate,
}

/// Catalog of all published works
#[derive(Debug, Default)]
pub struct Catalog {
    works: HashMap<WorkId, Work>,
    // Global publication order
    order: Vec<WorkId>,
    // Per-creator publication order
    by_creator: HashMap<AccountId, Vec<WorkId>>,
    // Last issued work id; pre-incremented so id 0 is never assigned.
    work_counter: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a work, allocating the next sequential id and creating its
    /// gate in the same step. The caller (the ledger) has already verified
    /// the creator's registration.
    #[allow(clippy::too_many_arguments)]
    pub fn publish(
        &mut self,
        creator: AccountId,
        creator_id: CreatorId,
        title: impl Into<String>,
        audio_ref: impl Into<String>,
        cover_ref: impl Into<String>,
        unit_price: Amount,
        royalty_bps: u16,
    ) -> Result<WorkId> {
        let gate = AccessGate::with_royalty(creator.clone(), creator_id, unit_price, royalty_bps)?;

        self.work_counter += 1;
        let id = WorkId(self.work_counter);
        let title = title.into();

        info!(work = %id, creator = %creator, title = %title, %unit_price, "work published");

        self.works.insert(
            id,
            Work {
                id,
                creator_id,
                creator: creator.clone(),
                title,
                audio_ref: audio_ref.into(),
                cover_ref: cover_ref.into(),
                play_count: 0,
                gate,
            },
        );
        self.order.push(id);
        self.by_creator.entry(creator).or_default().push(id);
        Ok(id)
    }

    pub fn work(&self, id: WorkId) -> Result<&Work> {
        self.works
            .get(&id)
            .ok_or(TuneVaultError::WorkNotFound { work_id: id.0 })
    }

    pub fn work_mut(&mut self, id: WorkId) -> Result<&mut Work> {
        self.works
            .get_mut(&id)
            .ok_or(TuneVaultError::WorkNotFound { work_id: id.0 })
    }

    /// All works in publication order
    pub fn list_all(&self) -> Vec<&Work> {
        self.order.iter().filter_map(|id| self.works.get(id)).collect()
    }

    /// A creator's works in publication order
    pub fn list_by_creator(&self, creator: &AccountId) -> Vec<&Work> {
        self.by_creator
            .get(creator)
            .map(|ids| ids.iter().filter_map(|id| self.works.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn work_count(&self) -> usize {
        self.works.len()
    }
}
