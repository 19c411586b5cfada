use coffer_types::AssetId;

/// Custodied value in transit.
///
/// Deliberately not `Clone`, `Copy`, or `Serialize`: a `Funds` value is the
/// value. It is created at the custody boundary, consumed by deposits and
/// repayments, and produced by withdrawals, borrows, and skims. Duplicating
/// it would duplicate money.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping Funds discards custodied value"]
pub struct Funds {
    asset: AssetId,
    amount_minor: u64,
}

impl Funds {
    /// Wrap external value entering custody. This is the boundary
    /// constructor — inside the core, funds only come out of pools.
    pub fn new(asset: AssetId, amount_minor: u64) -> Self {
        Self {
            asset,
            amount_minor,
        }
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    pub fn amount_minor(&self) -> u64 {
        self.amount_minor
    }

    /// Consume the funds, yielding their parts. Callers absorb the value
    /// into a pool or hand it across the custody boundary.
    pub fn into_parts(self) -> (AssetId, u64) {
        (self.asset, self.amount_minor)
    }
}
