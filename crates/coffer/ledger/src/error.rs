use coffer_types::AssetId;
use thiserror::Error;

/// Errors from pool accounting operations.
///
/// Every variant aborts the enclosing unit of work; nothing is retried
/// inside the core.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("asset mismatch: pool holds {expected}, funds are {found}")]
    AssetMismatch { expected: AssetId, found: AssetId },

    #[error("pool has no claims outstanding")]
    PoolEmpty,

    #[error("cannot burn {requested} claims: only {outstanding} outstanding")]
    ExceedsClaims { requested: u64, outstanding: u64 },

    #[error("withdrawal of {claims} claims rounds to zero")]
    RoundsToZero { claims: u64 },

    #[error("insufficient balance: requested {requested} minor units, available {available}")]
    ExceedsBalance { requested: u64, available: u64 },

    #[error("balance arithmetic overflow")]
    Overflow,
}
