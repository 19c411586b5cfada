//! Coffer Kernel - the settlement engine over the pooled-custody ledger.
//!
//! All state changes go through an atomic [`UnitOfWork`]: the kernel hands
//! the caller a scratch view of every pool, the caller applies any number of
//! calls (deposits, rebalances, a flash borrow plus external venue steps
//! plus its settlement), and the whole bundle commits as an indivisible
//! whole — or is discarded as if it never happened. Flash loans ride on
//! this: a [`LoanReceipt`] that is still outstanding when the unit ends
//! rejects the entire unit, so an un-repaid borrow is structurally
//! impossible, with no reentrancy lock or balance-snapshot pattern needed.
//!
//! Execution is single-writer and fully ordered: every mutating entry point
//! takes `&mut VaultKernel`, so units of work against the same kernel are
//! totally serialized and never see each other in flight.

#![deny(unsafe_code)]

mod config;
mod error;
mod kernel;
pub mod mocks;
mod receipt;
mod traits;
mod unit;

pub use config::{KernelConfig, DEFAULT_SKIM_BPS};
pub use error::KernelError;
pub use kernel::VaultKernel;
pub use receipt::LoanReceipt;
pub use traits::{ExternalVenue, ProofStore};
pub use unit::UnitOfWork;
