//! Coffer Ledger - pooled balance accounting and share math.
//!
//! A [`Pool`] owns a custodied balance and a counter of outstanding
//! proportional claims. Value crosses the pool boundary only as [`Funds`],
//! a move-only wrapper that cannot be cloned or serialized — whoever holds
//! a `Funds` value holds the value itself.

#![deny(unsafe_code)]

mod error;
mod funds;
mod pool;

pub use error::LedgerError;
pub use funds::Funds;
pub use pool::Pool;
