use std::collections::HashMap;

use coffer_audit::EventLog;
use coffer_capability::{AuthoritySet, ControllerToken, OperatorToken, Role};
use coffer_ledger::{Funds, Pool};
use coffer_types::{AssetId, EventId, HolderId, PolicyId, PoolId, PoolSnapshot, ProofRef, VenueTag};
use tracing::{info, warn};

use crate::config::KernelConfig;
use crate::error::KernelError;
use crate::unit::UnitOfWork;

/// The settlement kernel: owns every pool, the committed event log, and the
/// identity of the authority tokens minted at bring-up.
///
/// Single-writer by construction — all mutation goes through `&mut self`,
/// so units of work are totally ordered and an in-flight unit is never
/// visible to another.
pub struct VaultKernel {
    pools: HashMap<PoolId, Pool>,
    log: EventLog,
    config: KernelConfig,
    authority: AuthoritySet,
}

impl VaultKernel {
    /// Bring up a kernel with default configuration, minting one Controller
    /// and one Operator token bound to `holder`.
    pub fn bootstrap(holder: HolderId) -> (Self, ControllerToken, OperatorToken) {
        Self::with_config(KernelConfig::default(), holder)
    }

    pub fn with_config(
        config: KernelConfig,
        holder: HolderId,
    ) -> (Self, ControllerToken, OperatorToken) {
        let (authority, controller, operator) = AuthoritySet::bootstrap(holder);
        let kernel = Self {
            pools: HashMap::new(),
            log: EventLog::new(),
            config,
            authority,
        };
        (kernel, controller, operator)
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Create a pool for an asset kind. Controller only.
    pub fn create_pool(
        &mut self,
        token: &ControllerToken,
        asset: AssetId,
    ) -> Result<PoolId, KernelError> {
        if !self.authority.recognizes(Role::Controller, token.id()) {
            return Err(KernelError::UnknownAuthority(token.id()));
        }

        let pool = Pool::new(asset);
        let pool_id = pool.id();
        info!(pool = %pool_id, asset = %pool.asset(), "pool created");
        self.pools.insert(pool_id, pool);
        Ok(pool_id)
    }

    /// Run one atomic unit of work.
    ///
    /// The closure gets a scratch copy of all pool state and may bundle any
    /// number of calls, including external venue steps between a flash
    /// borrow and its settlement. On `Ok` with every loan settled, scratch
    /// state and staged events commit as an indivisible whole. On error —
    /// or if a loan receipt is still outstanding — everything since the
    /// start of the unit is discarded and the kernel is exactly as it was.
    pub fn execute<T>(
        &mut self,
        f: impl FnOnce(&mut UnitOfWork) -> Result<T, KernelError>,
    ) -> Result<T, KernelError> {
        let mut unit = UnitOfWork::new(self.pools.clone(), self.authority, self.config);

        match f(&mut unit) {
            Ok(value) => {
                let outstanding = unit.outstanding();
                if outstanding > 0 {
                    warn!(outstanding, "unit of work rejected: unsettled flash loan");
                    return Err(KernelError::UnsettledLoan { outstanding });
                }
                let (pools, staged) = unit.into_commit();
                self.pools = pools;
                self.log.extend(staged);
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "unit of work rejected");
                Err(err)
            }
        }
    }

    /// One-shot deposit in its own unit of work.
    pub fn deposit(
        &mut self,
        pool_id: PoolId,
        funds: Funds,
        actor: &HolderId,
    ) -> Result<u64, KernelError> {
        self.execute(|unit| unit.deposit(pool_id, funds, actor))
    }

    /// One-shot withdrawal in its own unit of work.
    pub fn withdraw(
        &mut self,
        pool_id: PoolId,
        claims: u64,
        actor: &HolderId,
    ) -> Result<Funds, KernelError> {
        self.execute(|unit| unit.withdraw(pool_id, claims, actor))
    }

    /// One-shot rebalance-out in its own unit of work.
    pub fn rebalance_out(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        amount_minor: u64,
        venue: VenueTag,
    ) -> Result<Funds, KernelError> {
        self.execute(|unit| unit.rebalance_out(token, pool_id, amount_minor, venue))
    }

    /// One-shot rebalance-in in its own unit of work.
    pub fn rebalance_in(
        &mut self,
        pool_id: PoolId,
        funds: Funds,
        actor: &HolderId,
    ) -> Result<u64, KernelError> {
        self.execute(|unit| unit.rebalance_in(pool_id, funds, actor))
    }

    /// One-shot yield skim in its own unit of work.
    pub fn skim(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        amount_minor: u64,
    ) -> Result<Funds, KernelError> {
        self.execute(|unit| unit.skim(token, pool_id, amount_minor))
    }

    /// One-shot reasoning-proof record in its own unit of work.
    pub fn record_proof(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        blob_ref: ProofRef,
    ) -> Result<EventId, KernelError> {
        self.execute(|unit| unit.record_proof(token, pool_id, blob_ref))
    }

    /// One-shot encrypted reasoning-proof record in its own unit of work.
    pub fn record_encrypted_proof(
        &mut self,
        token: &OperatorToken,
        pool_id: PoolId,
        blob_ref: ProofRef,
        policy: PolicyId,
    ) -> Result<EventId, KernelError> {
        self.execute(|unit| unit.record_encrypted_proof(token, pool_id, blob_ref, policy))
    }

    pub fn balance_minor(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool(pool_id)?.balance_minor())
    }

    pub fn total_claims(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool(pool_id)?.total_claims())
    }

    pub fn yield_minor(&self, pool_id: PoolId) -> Result<u64, KernelError> {
        Ok(self.pool(pool_id)?.yield_minor())
    }

    pub fn snapshot(&self, pool_id: PoolId) -> Result<PoolSnapshot, KernelError> {
        Ok(self.pool(pool_id)?.snapshot())
    }

    pub fn asset(&self, pool_id: PoolId) -> Result<&AssetId, KernelError> {
        Ok(self.pool(pool_id)?.asset())
    }

    /// The committed event log. Observational only — the kernel never reads
    /// it back to make decisions.
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    fn pool(&self, pool_id: PoolId) -> Result<&Pool, KernelError> {
        self.pools
            .get(&pool_id)
            .ok_or(KernelError::UnknownPool(pool_id))
    }
}
