use anchor_lang::prelude::*;

use crate::error::{MerkleDropError, Result};
use crate::state::PeriodStore;

/**
 * Mutable distribution state
 *
 * Everything a claim, period creation or recovery writes. The engine keeps a
 * single instance behind its lock, so the running total and the claim ledger
 * entries always change together.
 *
 * Invariant: total_claimed <= supply_ceiling <= total_supply, and
 * supply_ceiling + total_recovered == total_supply.
 */
#[derive(Clone, Debug)]
pub struct DropState {
    /// Periods and their claim ledgers
    pub store: PeriodStore,

    /// Aggregate amount recorded as claimed across every period
    pub total_claimed: u64,

    /// Effective payout ceiling
    /// - Starts at the configured total supply
    /// - Tightened to total_claimed by recovery
    pub supply_ceiling: u64,

    /// Amount swept out by recovery
    pub total_recovered: u64,
}

impl DropState {
    pub fn new(store: PeriodStore, total_supply: u64) -> Self {
        Self {
            store,
            total_claimed: 0,
            supply_ceiling: total_supply,
            total_recovered: 0,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.supply_ceiling.saturating_sub(self.total_claimed)
    }

    /// New running total if `amount` more were paid, or `SupplyExceeded`.
    pub fn checked_claim_total(&self, amount: u64) -> Result<u64> {
        let exceeded = || MerkleDropError::SupplyExceeded {
            requested: amount,
            total_claimed: self.total_claimed,
            ceiling: self.supply_ceiling,
        };
        let new_total = self.total_claimed.checked_add(amount).ok_or_else(exceeded)?;
        if new_total > self.supply_ceiling {
            return Err(exceeded());
        }
        Ok(new_total)
    }

    /// Records a claim and bumps the running total in one step.
    pub fn commit_claim(&mut self, period: u32, recipient: Pubkey, amount: u64) -> Result<u64> {
        self.store.get_period(period)?.ensure_unclaimed(&recipient)?;
        let new_total = self.checked_claim_total(amount)?;
        self.store.record_claim(period, recipient, amount)?;
        self.total_claimed = new_total;
        Ok(new_total)
    }

    /// Reverses `commit_claim` for a claim whose payout never landed.
    pub fn rollback_claim(&mut self, period: u32, recipient: &Pubkey) {
        if let Some(amount) = self.store.revert_claim(period, recipient) {
            self.total_claimed -= amount;
        }
    }

    /// Consumes the unclaimed remainder so no later claim can reach it.
    pub fn consume_remainder(&mut self) -> Result<u64> {
        let remainder = self.remaining();
        if remainder == 0 {
            return Err(MerkleDropError::NothingToRecover);
        }
        self.total_recovered = self
            .total_recovered
            .checked_add(remainder)
            .ok_or(MerkleDropError::ArithmeticOverflow)?;
        self.supply_ceiling = self.total_claimed;
        Ok(remainder)
    }

    pub fn restore_remainder(&mut self, remainder: u64) {
        self.supply_ceiling += remainder;
        self.total_recovered -= remainder;
    }
}
