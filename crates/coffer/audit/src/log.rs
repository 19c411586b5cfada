use chrono::{DateTime, Utc};
use coffer_types::{PoolId, PoolSnapshot};

use crate::event::EventRecord;

/// Filter for querying the event log.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    pub pool: Option<PoolId>,
    pub kind: Option<&'static str>,
    pub after: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, pool: PoolId) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &EventRecord) -> bool {
        if let Some(pool) = self.pool {
            if record.pool != pool {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind.name() != kind {
                return false;
            }
        }
        if let Some(after) = self.after {
            if record.recorded_at < after {
                return false;
            }
        }
        true
    }
}

/// Append-only event log.
///
/// There are NO delete or modify operations — the only mutations are
/// `append` and `extend`. Records arrive already-committed: a rejected unit
/// of work stages its records internally and discards them, so nothing
/// here ever describes a state transition that did not persist.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a single committed record.
    pub fn append(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    /// Append every record of a committed unit of work, in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = EventRecord>) {
        self.records.extend(records);
    }

    /// Query records matching a filter, oldest first.
    pub fn query(&self, filter: &EventFilter) -> Vec<&EventRecord> {
        let iter = self.records.iter().filter(|r| filter.matches(r));
        match filter.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }

    /// Full history for one pool, oldest first.
    pub fn history(&self, pool: PoolId) -> Vec<&EventRecord> {
        self.query(&EventFilter::new().with_pool(pool))
    }

    /// Reconstruct the pool state implied by the log: the post-snapshot of
    /// the pool's most recent record. `None` if the pool has no history.
    pub fn replay(&self, pool: PoolId) -> Option<PoolSnapshot> {
        self.records
            .iter()
            .rev()
            .find(|r| r.pool == pool)
            .map(|r| r.post)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use coffer_types::{HolderId, ProofRef, VenueTag};

    fn snap(balance: u64, claims: u64) -> PoolSnapshot {
        PoolSnapshot {
            balance_minor: balance,
            total_claims: claims,
        }
    }

    fn deposit_record(pool: PoolId, pre: PoolSnapshot, amount: u64) -> EventRecord {
        let post = snap(pre.balance_minor + amount, pre.total_claims + amount);
        EventRecord::new(
            pool,
            HolderId::new("depositor-1"),
            EventKind::Deposit {
                amount_minor: amount,
                claims_minted: amount,
            },
            pre,
            post,
        )
    }

    #[test]
    fn append_and_history() {
        let mut log = EventLog::new();
        let pool = PoolId::new();
        log.append(deposit_record(pool, snap(0, 0), 1_000));
        log.append(deposit_record(pool, snap(1_000, 1_000), 500));

        let history = log.history(pool);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].pre, snap(0, 0));
        assert_eq!(history[1].post, snap(1_500, 1_500));
    }

    #[test]
    fn replay_returns_latest_post_snapshot() {
        let mut log = EventLog::new();
        let pool = PoolId::new();
        let other = PoolId::new();
        log.append(deposit_record(pool, snap(0, 0), 1_000));
        log.append(deposit_record(other, snap(0, 0), 77));
        log.append(deposit_record(pool, snap(1_000, 1_000), 500));

        assert_eq!(log.replay(pool), Some(snap(1_500, 1_500)));
        assert_eq!(log.replay(other), Some(snap(77, 77)));
        assert_eq!(log.replay(PoolId::new()), None);
    }

    #[test]
    fn query_by_kind_and_limit() {
        let mut log = EventLog::new();
        let pool = PoolId::new();
        log.append(deposit_record(pool, snap(0, 0), 1_000));
        log.append(EventRecord::new(
            pool,
            HolderId::new("operator"),
            EventKind::RebalanceOut {
                amount_minor: 400,
                venue: VenueTag::new("venue-a"),
            },
            snap(1_000, 1_000),
            snap(600, 1_000),
        ));
        log.append(EventRecord::new(
            pool,
            HolderId::new("operator"),
            EventKind::ReasoningProofRecorded {
                blob_ref: ProofRef::new("walrus://abc"),
            },
            snap(600, 1_000),
            snap(600, 1_000),
        ));

        let deposits = log.query(&EventFilter::new().with_kind("deposit"));
        assert_eq!(deposits.len(), 1);

        let limited = log.query(&EventFilter::new().with_pool(pool).with_limit(2));
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn query_by_time_range() {
        let mut log = EventLog::new();
        let pool = PoolId::new();
        let mut early = deposit_record(pool, snap(0, 0), 1_000);
        early.recorded_at = Utc::now() - chrono::Duration::minutes(10);
        log.append(early);
        log.append(deposit_record(pool, snap(1_000, 1_000), 500));

        let cutoff = Utc::now() - chrono::Duration::minutes(5);
        let recent = log.query(&EventFilter::new().with_after(cutoff));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].post, snap(1_500, 1_500));

        // A cutoff before any record matches everything.
        let all = log.query(&EventFilter::new().with_after(cutoff - chrono::Duration::hours(1)));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn proof_records_leave_state_untouched() {
        let mut log = EventLog::new();
        let pool = PoolId::new();
        log.append(deposit_record(pool, snap(0, 0), 1_000));
        log.append(EventRecord::new(
            pool,
            HolderId::new("operator"),
            EventKind::ReasoningProofRecorded {
                blob_ref: ProofRef::new("walrus://abc"),
            },
            snap(1_000, 1_000),
            snap(1_000, 1_000),
        ));

        // Replay still reports the accounting state, proof record included.
        assert_eq!(log.replay(pool), Some(snap(1_000, 1_000)));
    }
}
