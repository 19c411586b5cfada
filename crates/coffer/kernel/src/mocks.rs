//! In-memory implementations of the external collaborator traits, for tests
//! and simulations.

use std::collections::HashMap;

use coffer_ledger::Funds;
use coffer_types::{AssetId, ProofRef, VenueTag};

use crate::traits::{ExternalVenue, ProofStore};

/// A venue that holds whatever is deployed to it and can be told to accrue
/// yield out of thin air.
#[derive(Debug, Default)]
pub struct MockVenue {
    tag: String,
    held: HashMap<AssetId, u64>,
}

impl MockVenue {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            held: HashMap::new(),
        }
    }

    /// Simulate yield accruing on deployed capital.
    pub fn accrue(&mut self, asset: AssetId, amount_minor: u64) {
        *self.held.entry(asset).or_insert(0) += amount_minor;
    }

    pub fn held_minor(&self, asset: &AssetId) -> u64 {
        self.held.get(asset).copied().unwrap_or(0)
    }
}

impl ExternalVenue for MockVenue {
    fn tag(&self) -> VenueTag {
        VenueTag::new(self.tag.clone())
    }

    fn deploy(&mut self, funds: Funds) {
        let (asset, amount) = funds.into_parts();
        *self.held.entry(asset).or_insert(0) += amount;
    }

    fn recall(&mut self, asset: &AssetId, amount_minor: u64) -> Option<Funds> {
        let held = self.held.get_mut(asset)?;
        if *held < amount_minor {
            return None;
        }
        *held -= amount_minor;
        Some(Funds::new(asset.clone(), amount_minor))
    }
}

/// An in-memory proof store issuing sequential references.
#[derive(Debug, Default)]
pub struct MockProofStore {
    blobs: HashMap<String, Vec<u8>>,
    next: u64,
}

impl MockProofStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ProofStore for MockProofStore {
    fn put(&mut self, blob: &[u8]) -> ProofRef {
        let key = format!("blob-{}", self.next);
        self.next += 1;
        self.blobs.insert(key.clone(), blob.to_vec());
        ProofRef::new(key)
    }

    fn get(&self, reference: &ProofRef) -> Option<Vec<u8>> {
        self.blobs.get(&reference.0).cloned()
    }
}
