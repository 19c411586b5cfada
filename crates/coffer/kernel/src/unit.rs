use std::collections::HashMap;

use coffer_audit::{EventKind, EventRecord};
use coffer_capability::{AuthoritySet, OperatorToken, Role};
use coffer_ledger::{Funds, Pool};
use coffer_types::{EventId, HolderId, PolicyId, PoolId, PoolSnapshot, ProofRef, VenueTag};
use tracing::debug;

use crate::config::KernelConfig;
use crate::error::KernelError;
use crate::receipt::LoanReceipt;

/// One atomic unit of work against the kernel's pools.
///
/// Created only by [`VaultKernel::execute`](crate::VaultKernel::execute),
/// which hands the closure a scratch copy of all pool state. Every call
/// below mutates the scratch and stages an event record; nothing becomes
/// visible until the unit commits. A unit commits only if the closure
/// returns `Ok` AND no loan receipt is outstanding — otherwise scratch and
/// staged events are discarded together, as if the unit never ran.
pub struct UnitOfWork {
    id: uuid::Uuid,
    pools: HashMap<PoolId, Pool>,
    staged: Vec<EventRecord>,
    outstanding: u32,
    authority: AuthoritySet,
    config: KernelConfig,
}

impl UnitOfWork {
    pub(crate) fn new(
        pools: HashMap<PoolId, Pool>,
        authority: AuthoritySet,
        config: KernelConfig,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            pools,
            staged: Vec::new(),
            outstanding: 0,
            authority,
            config,
        }
    }

    pub(crate) fn outstanding(&self) -> u32 {
        self.outstanding
    }

    pub(crate) fn into_commit(self) -> (HashMap<PoolId, Pool>, Vec<EventRecord>) {
        (self.pools, self.staged)
    }

    /// Deposit funds, minting claims 1:1 with the amount. Open to anyone.
    pub fn deposit(
        &mut self,
        pool_id: PoolId,
        funds: Funds,
        actor: &HolderId,
    ) -> Result<u64, KernelError> {
        let pool = self.pool_mut(pool_id)?;
        let pre = pool.snapshot();
        let minted = pool.deposit(funds)?;
        let post = pool.snapshot();

        self.stage(
            pool_id,
            actor.clone(),
            EventKind::Deposit {
                amount_minor: minted,
                claims_minted: minted,
            },
            pre,
            post,
        );
        Ok(minted)
    }

    /// Burn claims for the proportional share of the balance. Open to anyone
    /// holding claims.
    pub fn withdraw(
        &mut self,
        pool_id: PoolId,
        claims: u64,
        actor: &HolderId,
    ) -> Result<Funds, KernelError> {
        let pool = self.pool_mut(pool_id)?;
        let pre = pool.snapshot();
        let funds = pool.withdraw(claims)?;
        let post = pool.snapshot();

        self.stage(
            pool_id,
            actor.clone(),
            EventKind::Withdraw {
                claims_burned: claims,
                amount_minor: funds.amount_minor(),
            },
            pre,
            post,
        );
        Ok(funds)
    }

    /// Move custody out to an external venue. Operator only. Claims are
    /// untouched — they track principal obligation, not current custody.
    pub fn rebalance_out(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        amount_minor: u64,
        venue: VenueTag,
    ) -> Result<Funds, KernelError> {
        let holder = self.require_operator(token)?;
        let pool = self.pool_mut(pool_id)?;
        let pre = pool.snapshot();
        let funds = pool.debit(amount_minor)?;
        let post = pool.snapshot();

        self.stage(
            pool_id,
            holder,
            EventKind::RebalanceOut {
                amount_minor,
                venue,
            },
            pre,
            post,
        );
        Ok(funds)
    }

    /// Return custody from an external venue. No token required: handing
    /// value to the pool needs no privilege. Any amount above outstanding
    /// claims becomes pool surplus.
    pub fn rebalance_in(
        &mut self,
        pool_id: PoolId,
        funds: Funds,
        actor: &HolderId,
    ) -> Result<u64, KernelError> {
        let pool = self.pool_mut(pool_id)?;
        let pre = pool.snapshot();
        let amount = pool.credit(funds)?;
        let post = pool.snapshot();

        self.stage(
            pool_id,
            actor.clone(),
            EventKind::RebalanceIn {
                amount_minor: amount,
            },
            pre,
            post,
        );
        Ok(amount)
    }

    /// Flash-borrow from the pool. Operator only. The balance drops
    /// immediately; the returned receipt must be consumed by [`settle`]
    /// before this unit of work ends, or the unit is rejected wholesale.
    ///
    /// No event is staged here — the completed cycle is recorded once, at
    /// settlement. A borrow that never settles never commits, so it leaves
    /// no trace.
    ///
    /// [`settle`]: UnitOfWork::settle
    pub fn borrow(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        amount_minor: u64,
    ) -> Result<(Funds, LoanReceipt), KernelError> {
        let _holder = self.require_operator(token)?;
        let unit = self.id;
        let pool = self.pool_mut(pool_id)?;
        let funds = pool.debit(amount_minor)?;

        self.outstanding += 1;
        debug!(pool = %pool_id, amount = amount_minor, "flash borrow");

        Ok((funds, LoanReceipt::new(pool_id, amount_minor, unit)))
    }

    /// Repay a flash borrow, consuming its receipt. Receipt-gated, not
    /// token-gated: possessing the matching receipt and the repayment funds
    /// is itself the authorization. Repayment may exceed the borrowed
    /// amount; the surplus stays in the pool.
    pub fn settle(
        &mut self,
        pool_id: PoolId,
        funds: Funds,
        receipt: LoanReceipt,
        venue: VenueTag,
        actor: &HolderId,
    ) -> Result<(), KernelError> {
        if receipt.unit() != self.id {
            // Receipts only escape a unit that was already discarded; they
            // must not settle against live state.
            return Err(KernelError::StaleReceipt);
        }
        if receipt.pool_id() != pool_id {
            return Err(KernelError::VaultMismatch {
                receipt_pool: receipt.pool_id(),
                pool: pool_id,
            });
        }

        let borrowed = receipt.amount_minor();
        if funds.amount_minor() < borrowed {
            return Err(KernelError::LoanNotRepaid {
                borrowed_minor: borrowed,
                repaid_minor: funds.amount_minor(),
            });
        }

        let pool = self.pool_mut(pool_id)?;
        let pre = pool.snapshot();
        let repaid = pool.credit(funds)?;
        let post = pool.snapshot();

        self.outstanding -= 1;
        debug!(pool = %pool_id, borrowed, repaid, "flash settle");

        self.stage(
            pool_id,
            actor.clone(),
            EventKind::FlashSettle {
                borrowed_minor: borrowed,
                repaid_minor: repaid,
                venue,
            },
            pre,
            post,
        );
        Ok(())
    }

    /// Skim operating funds from accrued yield. Operator only. Bounded to
    /// `skim_bps` of the surplus above outstanding claims, so principal is
    /// never touched.
    pub fn skim(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        amount_minor: u64,
    ) -> Result<Funds, KernelError> {
        let holder = self.require_operator(token)?;
        let config = self.config;

        let pool = self.pool_mut(pool_id)?;
        let yield_minor = pool.yield_minor();
        if yield_minor == 0 {
            return Err(KernelError::NoYield(pool_id));
        }
        let cap = config.skim_cap_minor(yield_minor);
        if amount_minor > cap {
            return Err(KernelError::SkimExceedsLimit {
                requested_minor: amount_minor,
                cap_minor: cap,
            });
        }

        let pre = pool.snapshot();
        let funds = pool.debit(amount_minor)?;
        let post = pool.snapshot();

        self.stage(
            pool_id,
            holder,
            EventKind::YieldSkim {
                amount_minor,
            },
            pre,
            post,
        );
        Ok(funds)
    }

    /// Record a pointer to an off-chain reasoning proof. Operator only.
    /// State is untouched; the record exists so auditors can link a
    /// rebalance to the reasoning behind it.
    pub fn record_proof(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        blob_ref: ProofRef,
    ) -> Result<EventId, KernelError> {
        let holder = self.require_operator(token)?;
        if blob_ref.is_empty() {
            return Err(KernelError::EmptyBlobReference);
        }
        let snapshot = self.pool_ref(pool_id)?.snapshot();
        Ok(self.stage(
            pool_id,
            holder,
            EventKind::ReasoningProofRecorded { blob_ref },
            snapshot,
            snapshot,
        ))
    }

    /// Record a pointer to an encrypted reasoning proof and the policy it
    /// was sealed under. The blob content itself never enters the core.
    pub fn record_encrypted_proof(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        blob_ref: ProofRef,
        policy: PolicyId,
    ) -> Result<EventId, KernelError> {
        let holder = self.require_operator(token)?;
        if blob_ref.is_empty() {
            return Err(KernelError::EmptyBlobReference);
        }
        let snapshot = self.pool_ref(pool_id)?.snapshot();
        Ok(self.stage(
            pool_id,
            holder,
            EventKind::EncryptedReasoningProofRecorded { blob_ref, policy },
            snapshot,
            snapshot,
        ))
    }

    pub fn balance_minor(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool_ref(pool_id)?.balance_minor())
    }

    pub fn total_claims(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool_ref(pool_id)?.total_claims())
    }

    pub fn yield_minor(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool_ref(pool_id)?.yield_minor())
    }

    pub fn snapshot(&self, pool_id: PoolId) -> Result<PoolSnapshot, KernelError> {
        Ok(self.pool_ref(pool_id)?.snapshot())
    }

    fn require_operator(&self, token: &OperatorToken) -> Result<HolderId, KernelError> {
        if !self.authority.recognizes(Role::Operator, token.id()) {
            return Err(KernelError::UnknownAuthority(token.id()));
        }
        Ok(token.holder().clone())
    }

    fn pool_ref(&self, pool_id: PoolId) -> Result<&Pool, KernelError> {
        self.pools
            .get(&pool_id)
            .ok_or(KernelError::UnknownPool(pool_id))
    }

    fn pool_mut(&mut self, pool_id: PoolId) -> Result<&mut Pool, KernelError> {
        self.pools
            .get_mut(&pool_id)
            .ok_or(KernelError::UnknownPool(pool_id))
    }

    fn stage(
        &mut self,
        pool: PoolId,
        actor: HolderId,
        kind: EventKind,
        pre: PoolSnapshot,
        post: PoolSnapshot,
    ) -> EventId {
        let record = EventRecord::new(pool, actor, kind, pre, post);
        let event_id = record.event_id;
        self.staged.push(record);
        event_id
    }
}
