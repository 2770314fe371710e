//! TuneVault Identity Registry
//!
//! Tracks creator and consumer registrations in independent namespaces.
//! Registration is idempotent-reject: a second registration for the same
//! account fails and never overwrites the first. Creator ids are assigned
//! from a sequential counter and never reused.
//!
//! Presence is an explicit map entry, never inferred from field contents,
//! so a legitimately empty name stays distinguishable from "not registered".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use tunevault_types::{AccountId, CreatorId, Result, TuneVaultError};

/// A registered creator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: CreatorId,
    pub name: String,
    pub profile_ref: String,
}

/// A registered consumer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumer {
    pub name: String,
    pub profile_ref: String,
}

/// Registry of all creators and consumers
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    creators: HashMap<AccountId, Creator>,
    consumers: HashMap<AccountId, Consumer>,
    // Last issued creator id; pre-incremented so id 0 is never assigned.
    creator_counter: u64,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creator, allocating the next sequential id.
    ///
    /// Fails with `AlreadyRegistered` if the account already holds a
    /// creator record; the existing record is never overwritten.
    pub fn register_creator(
        &mut self,
        account: AccountId,
        name: impl Into<String>,
        profile_ref: impl Into<String>,
    ) -> Result<CreatorId> {
        if self.creators.contains_key(&account) {
            return Err(TuneVaultError::AlreadyRegistered {
                account: account.0,
            });
        }

        self.creator_counter += 1;
        let id = CreatorId(self.creator_counter);
        let name = name.into();

        info!(creator = %id, account = %account, name = %name, "creator registered");
        self.creators.insert(
            account,
            Creator {
                id,
                name,
                profile_ref: profile_ref.into(),
            },
        );
        Ok(id)
    }

    /// Register a consumer. Consumers need no numeric id; downstream
    /// components address them by account handle.
    pub fn register_consumer(
        &mut self,
        account: AccountId,
        name: impl Into<String>,
        profile_ref: impl Into<String>,
    ) -> Result<()> {
        if self.consumers.contains_key(&account) {
            return Err(TuneVaultError::AlreadyRegistered {
                account: account.0,
            });
        }

        let name = name.into();
        info!(account = %account, name = %name, "consumer registered");
        self.consumers.insert(
            account,
            Consumer {
                name,
                profile_ref: profile_ref.into(),
            },
        );
        Ok(())
    }

    pub fn is_registered_creator(&self, account: &AccountId) -> bool {
        self.creators.contains_key(account)
    }

    pub fn is_registered_consumer(&self, account: &AccountId) -> bool {
        self.consumers.contains_key(account)
    }

    pub fn creator(&self, account: &AccountId) -> Option<&Creator> {
        self.creators.get(account)
    }

    pub fn consumer(&self, account: &AccountId) -> Option<&Consumer> {
        self.consumers.get(account)
    }

    pub fn creator_count(&self) -> usize {
        self.creators.len()
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_ids_are_sequential_from_one() {
        let mut registry = IdentityRegistry::new();
        let a = registry
            .register_creator(AccountId::from("alice"), "Alice", "ipfs://alice")
            .unwrap();
        let b = registry
            .register_creator(AccountId::from("bob"), "Bob", "ipfs://bob")
            .unwrap();
        assert_eq!(a, CreatorId(1));
        assert_eq!(b, CreatorId(2));
    }

    #[test]
    fn duplicate_creator_is_rejected_without_overwrite() {
        let mut registry = IdentityRegistry::new();
        registry
            .register_creator(AccountId::from("alice"), "Alice", "ipfs://alice")
            .unwrap();

        let result = registry.register_creator(AccountId::from("alice"), "Imposter", "ipfs://x");
        assert!(matches!(
            result,
            Err(TuneVaultError::AlreadyRegistered { .. })
        ));

        // Registry size and the original record are unchanged
        assert_eq!(registry.creator_count(), 1);
        let creator = registry.creator(&AccountId::from("alice")).unwrap();
        assert_eq!(creator.name, "Alice");
        assert_eq!(creator.id, CreatorId(1));
    }

    #[test]
    fn duplicate_consumer_is_rejected() {
        let mut registry = IdentityRegistry::new();
        registry
            .register_consumer(AccountId::from("carol"), "Carol", "ipfs://carol")
            .unwrap();
        let result = registry.register_consumer(AccountId::from("carol"), "Carol", "ipfs://carol");
        assert!(matches!(
            result,
            Err(TuneVaultError::AlreadyRegistered { .. })
        ));
        assert_eq!(registry.consumer_count(), 1);
    }

    #[test]
    fn namespaces_are_independent() {
        let mut registry = IdentityRegistry::new();
        registry
            .register_creator(AccountId::from("dual"), "Dual", "ipfs://dual")
            .unwrap();
        // Same handle may register as a consumer
        registry
            .register_consumer(AccountId::from("dual"), "Dual", "ipfs://dual")
            .unwrap();

        assert!(registry.is_registered_creator(&AccountId::from("dual")));
        assert!(registry.is_registered_consumer(&AccountId::from("dual")));
        assert!(!registry.is_registered_creator(&AccountId::from("nobody")));
    }

    #[test]
    fn empty_name_is_still_registered() {
        let mut registry = IdentityRegistry::new();
        registry
            .register_consumer(AccountId::from("anon"), "", "")
            .unwrap();
        assert!(registry.is_registered_consumer(&AccountId::from("anon")));
    }
}
