//! Identity types for TuneVault
//!
//! Accounts are addressed by an external stable handle. Creators and works
//! additionally carry sequential numeric identifiers assigned by the ledger;
//! id 0 is never issued and acts as the "does not exist" sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External stable identity of a participant (account handle)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Sequential identifier for a registered creator (starts at 1, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatorId(pub u64);

impl CreatorId {
    /// Reserved sentinel meaning "no such creator"
    pub const NONE: CreatorId = CreatorId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creator_{}", self.0)
    }
}

/// Sequential identifier for a published work (starts at 1, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkId(pub u64);

impl WorkId {
    /// Reserved sentinel meaning "no such work"
    pub const NONE: WorkId = WorkId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "work_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_equality_and_display() {
        let a = AccountId::from("alice");
        let b = AccountId::new("alice");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "alice");
    }

    #[test]
    fn sentinel_ids_are_unassigned() {
        assert!(!WorkId::NONE.is_assigned());
        assert!(!CreatorId::NONE.is_assigned());
        assert!(WorkId(1).is_assigned());
    }

    #[test]
    fn work_id_display() {
        assert_eq!(WorkId(7).to_string(), "work_7");
    }
}
