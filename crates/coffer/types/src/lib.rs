//! Coffer Types - shared identifiers and observational types.
//!
//! Everything in this crate is freely cloneable and serializable. Linear
//! values (funds, authority tokens, loan receipts) live in the crates that
//! enforce their ownership discipline, never here.

#![deny(unsafe_code)]

mod ids;

pub use ids::{EventId, PoolId, TokenId};

use serde::{Deserialize, Serialize};

/// Asset identifier — a string wrapper for asset codes (e.g., "USDC", "SUI").
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque label for an external yield venue, carried on rebalance and
/// settlement records for audit. The core never interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueTag(pub String);

impl VenueTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl std::fmt::Display for VenueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a party as recorded on events: a depositor, a token holder,
/// or whoever presents a loan receipt. Purely observational — authorization
/// is by token possession, never by holder lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(pub String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a reasoning-proof blob in the off-chain proof store.
/// The blob content itself is never stored or interpreted by the core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofRef(pub String);

impl ProofRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ProofRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the encryption policy under which an encrypted reasoning
/// proof was sealed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub String);

impl PolicyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pol:{}", self.0)
    }
}

/// Point-in-time view of a pool's accounting state. Attached to every event
/// record as pre/post pairs so the full history can be reconstructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Custodied balance in minor units
    pub balance_minor: u64,
    /// Outstanding proportional claims
    pub total_claims: u64,
}

impl PoolSnapshot {
    /// Surplus above what is owed to claim holders.
    pub fn yield_minor(&self) -> u64 {
        self.balance_minor.saturating_sub(self.total_claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_display() {
        let asset = AssetId::new("USDC");
        assert_eq!(format!("{}", asset), "USDC");
    }

    #[test]
    fn proof_ref_emptiness() {
        assert!(ProofRef::new("").is_empty());
        assert!(!ProofRef::new("blob-01").is_empty());
    }

    #[test]
    fn snapshot_yield_saturates() {
        let under = PoolSnapshot {
            balance_minor: 500,
            total_claims: 1000,
        };
        assert_eq!(under.yield_minor(), 0);

        let over = PoolSnapshot {
            balance_minor: 2050,
            total_claims: 1000,
        };
        assert_eq!(over.yield_minor(), 1050);
    }

    #[test]
    fn snapshot_serialization() {
        let snap = PoolSnapshot {
            balance_minor: 1000,
            total_claims: 1000,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let restored: PoolSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, restored);
    }
}
