use coffer_types::{AssetId, PoolId, PoolSnapshot};
use tracing::debug;

use crate::error::LedgerError;
use crate::funds::Funds;

/// A pooled-custody ledger for one asset kind.
///
/// `balance_minor` is the quantity currently held; `total_claims` counts all
/// outstanding proportional claims against it. Both fields change only
/// through the methods below, each of which is atomic with respect to the
/// enclosing unit of work.
///
/// Claims track principal obligation, not current custody: rebalancing funds
/// out to a venue reduces the balance but leaves claims untouched.
#[derive(Clone, Debug)]
pub struct Pool {
    id: PoolId,
    asset: AssetId,
    balance_minor: u64,
    total_claims: u64,
}

impl Pool {
    pub fn new(asset: AssetId) -> Self {
        Self {
            id: PoolId::new(),
            asset,
            balance_minor: 0,
            total_claims: 0,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    pub fn balance_minor(&self) -> u64 {
        self.balance_minor
    }

    pub fn total_claims(&self) -> u64 {
        self.total_claims
    }

    /// Surplus above what is owed to claim holders.
    pub fn yield_minor(&self) -> u64 {
        self.balance_minor.saturating_sub(self.total_claims)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            balance_minor: self.balance_minor,
            total_claims: self.total_claims,
        }
    }

    /// Absorb deposited funds, minting claims 1:1 with the amount.
    ///
    /// Minting is deliberately NOT value-normalized against accrued surplus:
    /// a depositor joining after surplus has accrued receives `amount`
    /// claims, the same as one joining before. Preserved as specified.
    pub fn deposit(&mut self, funds: Funds) -> Result<u64, LedgerError> {
        let amount = self.check_incoming(&funds)?;

        // Compute both sums before assigning either, so a rejection leaves
        // the pool exactly as it was.
        let new_balance = self
            .balance_minor
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_claims = self
            .total_claims
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let _ = funds.into_parts();
        self.balance_minor = new_balance;
        self.total_claims = new_claims;

        debug!(
            pool = %self.id,
            amount,
            balance = self.balance_minor,
            claims = self.total_claims,
            "deposit"
        );

        Ok(amount)
    }

    /// Burn claims and release the proportional share of the balance.
    ///
    /// `amount = floor(claims * balance / total_claims)`, computed in u128.
    /// Withdrawing every outstanding claim therefore returns the balance in
    /// full, surplus included.
    pub fn withdraw(&mut self, claims: u64) -> Result<Funds, LedgerError> {
        if claims == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if self.total_claims == 0 {
            return Err(LedgerError::PoolEmpty);
        }
        if claims > self.total_claims {
            return Err(LedgerError::ExceedsClaims {
                requested: claims,
                outstanding: self.total_claims,
            });
        }

        let amount =
            (claims as u128 * self.balance_minor as u128 / self.total_claims as u128) as u64;
        if amount == 0 {
            return Err(LedgerError::RoundsToZero { claims });
        }

        self.total_claims -= claims;
        self.balance_minor -= amount;

        debug!(
            pool = %self.id,
            claims,
            amount,
            balance = self.balance_minor,
            remaining_claims = self.total_claims,
            "withdraw"
        );

        Ok(Funds::new(self.asset.clone(), amount))
    }

    /// Add funds to the balance without touching claims. Used for
    /// rebalance-in and flash-loan repayment; any amount above the
    /// outstanding claims becomes pool surplus.
    pub fn credit(&mut self, funds: Funds) -> Result<u64, LedgerError> {
        let amount = self.check_incoming(&funds)?;
        let new_balance = self
            .balance_minor
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let _ = funds.into_parts();
        self.balance_minor = new_balance;

        debug!(pool = %self.id, amount, balance = self.balance_minor, "credit");
        Ok(amount)
    }

    /// Remove funds from the balance without touching claims. Used for
    /// rebalance-out, flash borrows, and yield skims. Callers enforce any
    /// policy bound on `amount` before debiting.
    pub fn debit(&mut self, amount: u64) -> Result<Funds, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if amount > self.balance_minor {
            return Err(LedgerError::ExceedsBalance {
                requested: amount,
                available: self.balance_minor,
            });
        }

        self.balance_minor -= amount;
        debug!(pool = %self.id, amount, balance = self.balance_minor, "debit");

        Ok(Funds::new(self.asset.clone(), amount))
    }

    /// Validate incoming funds against this pool, returning the amount.
    /// Mutates nothing — callers commit only after every check has passed.
    fn check_incoming(&self, funds: &Funds) -> Result<u64, LedgerError> {
        if funds.asset() != &self.asset {
            return Err(LedgerError::AssetMismatch {
                expected: self.asset.clone(),
                found: funds.asset().clone(),
            });
        }

        let amount = funds.amount_minor();
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        Ok(amount)
    }
}
