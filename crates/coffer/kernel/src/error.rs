use coffer_ledger::LedgerError;
use coffer_types::{PoolId, TokenId};
use thiserror::Error;

/// Errors from kernel operations. Any error aborts the entire enclosing
/// unit of work; retry policy belongs to the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KernelError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("unknown pool: {0}")]
    UnknownPool(PoolId),

    #[error("token {0} is not a recognized authority for this operation")]
    UnknownAuthority(TokenId),

    #[error("pool {0} has no yield to skim")]
    NoYield(PoolId),

    #[error("skim of {requested_minor} minor units exceeds cap {cap_minor}")]
    SkimExceedsLimit { requested_minor: u64, cap_minor: u64 },

    #[error("loan receipt is for pool {receipt_pool}, not {pool}")]
    VaultMismatch { receipt_pool: PoolId, pool: PoolId },

    #[error("loan under-repaid: borrowed {borrowed_minor} minor units, repaid {repaid_minor}")]
    LoanNotRepaid {
        borrowed_minor: u64,
        repaid_minor: u64,
    },

    #[error("unit of work ended with {outstanding} unsettled loan(s)")]
    UnsettledLoan { outstanding: u32 },

    #[error("loan receipt was minted in a different unit of work")]
    StaleReceipt,

    #[error("reasoning proof requires a non-empty blob reference")]
    EmptyBlobReference,
}
