//! Coffer Audit - append-only event log and reasoning-proof records.
//!
//! One record per successful state-changing call, carrying the pool id,
//! actor, amounts, and pre/post pool snapshots — enough to reconstruct the
//! full balance/claims history. The log is a pure side channel: the core
//! never reads it back to make decisions.

#![deny(unsafe_code)]

mod event;
mod log;

pub use event::{EventKind, EventRecord};
pub use log::{EventFilter, EventLog};
