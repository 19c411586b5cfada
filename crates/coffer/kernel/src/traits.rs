use coffer_ledger::Funds;
use coffer_types::{AssetId, ProofRef, VenueTag};

/// An external yield venue, opaque to the kernel.
///
/// The kernel never calls a venue itself: the external decision agent moves
/// funds to and from venues as separate steps inside a unit of work. This
/// trait exists so agents and tests share one seam.
pub trait ExternalVenue {
    /// Tag recorded on rebalance and settlement events.
    fn tag(&self) -> VenueTag;

    /// Accept custody of funds.
    fn deploy(&mut self, funds: Funds);

    /// Return funds, if the venue holds at least `amount_minor` of `asset`.
    fn recall(&mut self, asset: &AssetId, amount_minor: u64) -> Option<Funds>;
}

/// Off-chain store for reasoning-proof blobs. The kernel only ever records
/// the returned references; blob content is never interpreted here.
pub trait ProofStore {
    fn put(&mut self, blob: &[u8]) -> ProofRef;

    fn get(&self, reference: &ProofRef) -> Option<Vec<u8>>;
}
