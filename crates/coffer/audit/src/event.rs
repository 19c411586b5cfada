use chrono::{DateTime, Utc};
use coffer_types::{EventId, HolderId, PolicyId, PoolId, PoolSnapshot, ProofRef, VenueTag};
use serde::{Deserialize, Serialize};

/// What happened in a state-changing call. Amounts are minor units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Deposit {
        amount_minor: u64,
        claims_minted: u64,
    },
    Withdraw {
        claims_burned: u64,
        amount_minor: u64,
    },
    RebalanceOut {
        amount_minor: u64,
        venue: VenueTag,
    },
    RebalanceIn {
        amount_minor: u64,
    },
    /// A completed flash borrow/repay cycle. Recorded at settlement; a
    /// borrow that never settles leaves no record because its unit of work
    /// is discarded wholesale.
    FlashSettle {
        borrowed_minor: u64,
        repaid_minor: u64,
        venue: VenueTag,
    },
    YieldSkim {
        amount_minor: u64,
    },
    /// Pointer-only record of an off-chain reasoning proof. The blob
    /// content never enters the core.
    ReasoningProofRecorded {
        blob_ref: ProofRef,
    },
    /// Pointer-only record of an encrypted reasoning proof, with the policy
    /// it was sealed under. Again, content stays off-chain.
    EncryptedReasoningProofRecorded {
        blob_ref: ProofRef,
        policy: PolicyId,
    },
}

impl EventKind {
    /// Short name used for filtering and display.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Deposit { .. } => "deposit",
            EventKind::Withdraw { .. } => "withdraw",
            EventKind::RebalanceOut { .. } => "rebalance_out",
            EventKind::RebalanceIn { .. } => "rebalance_in",
            EventKind::FlashSettle { .. } => "flash_settle",
            EventKind::YieldSkim { .. } => "yield_skim",
            EventKind::ReasoningProofRecorded { .. } => "reasoning_proof",
            EventKind::EncryptedReasoningProofRecorded { .. } => "encrypted_reasoning_proof",
        }
    }
}

/// A single immutable entry in the event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: EventId,
    pub pool: PoolId,
    pub actor: HolderId,
    pub kind: EventKind,
    /// Pool state immediately before the call applied.
    pub pre: PoolSnapshot,
    /// Pool state immediately after. For proof records, `pre == post`.
    pub post: PoolSnapshot,
    pub recorded_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(
        pool: PoolId,
        actor: HolderId,
        kind: EventKind,
        pre: PoolSnapshot,
        post: PoolSnapshot,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            pool,
            actor,
            kind,
            pre,
            post,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization() {
        let record = EventRecord::new(
            PoolId::new(),
            HolderId::new("depositor-1"),
            EventKind::Deposit {
                amount_minor: 1_000,
                claims_minted: 1_000,
            },
            PoolSnapshot {
                balance_minor: 0,
                total_claims: 0,
            },
            PoolSnapshot {
                balance_minor: 1_000,
                total_claims: 1_000,
            },
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }

    #[test]
    fn kind_names() {
        let kind = EventKind::FlashSettle {
            borrowed_minor: 400,
            repaid_minor: 400,
            venue: VenueTag::new("venue-a"),
        };
        assert_eq!(kind.name(), "flash_settle");

        let proof = EventKind::EncryptedReasoningProofRecorded {
            blob_ref: ProofRef::new("walrus://abc"),
            policy: PolicyId::new("seal-policy-1"),
        };
        assert_eq!(proof.name(), "encrypted_reasoning_proof");
    }
}
