use coffer_types::PoolId;

/// Obligation to repay a flash borrow.
///
/// Move-only and not `Clone` or `Serialize`: the one value minted by
/// [`UnitOfWork::borrow`](crate::UnitOfWork::borrow) is the one value
/// [`UnitOfWork::settle`](crate::UnitOfWork::settle) consumes, so a receipt
/// cannot be duplicated or double-settled. It also cannot be silently
/// ignored — a unit of work that ends while its receipt is outstanding is
/// rejected wholesale, and a receipt smuggled out of a discarded unit is
/// refused by `settle` as stale. Together these emulate the linear
/// hot-potato the design calls for.
#[derive(Debug)]
#[must_use = "a loan receipt must be settled within the unit of work that minted it"]
pub struct LoanReceipt {
    pool: PoolId,
    amount_minor: u64,
    unit: uuid::Uuid,
}

impl LoanReceipt {
    pub(crate) fn new(pool: PoolId, amount_minor: u64, unit: uuid::Uuid) -> Self {
        Self {
            pool,
            amount_minor,
            unit,
        }
    }

    pub fn pool_id(&self) -> PoolId {
        self.pool
    }

    pub fn amount_minor(&self) -> u64 {
        self.amount_minor
    }

    pub(crate) fn unit(&self) -> uuid::Uuid {
        self.unit
    }
}
