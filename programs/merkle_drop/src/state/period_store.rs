use anchor_lang::prelude::*;

use crate::error::{MerkleDropError, Result};
use crate::state::Period;

/**
 * Append-only sequence of periods
 *
 * Periods are stored in an arena indexed by their zero-based index and never
 * reference each other. The store enforces the spacing rules between periods
 * and owns every claim ledger entry.
 */
#[derive(Clone, Debug, Default)]
pub struct PeriodStore {
    start_time: i64,
    period_length: i64,
    periods: Vec<Period>,
}

impl PeriodStore {
    pub fn new(start_time: i64, period_length: i64) -> Self {
        Self {
            start_time,
            period_length,
            periods: Vec::new(),
        }
    }

    pub fn len(&self) -> u32 {
        // Bounded by create_period, which refuses to exceed u32::MAX entries
        self.periods.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn latest(&self) -> Option<&Period> {
        self.periods.last()
    }

    /// Earliest timestamp at which the next period may be created.
    pub fn next_period_earliest(&self) -> Result<i64> {
        match self.latest() {
            Some(previous) => previous
                .created_at
                .checked_add(self.period_length)
                .ok_or(MerkleDropError::ArithmeticOverflow),
            None => Ok(self.start_time),
        }
    }

    /// Appends a period created at `timestamp` and returns its index.
    pub fn create_period(&mut self, root: [u8; 32], timestamp: i64) -> Result<u32> {
        let earliest = self.next_period_earliest()?;
        if timestamp < earliest {
            return Err(MerkleDropError::OutOfOrder {
                timestamp,
                earliest,
            });
        }

        if self.periods.len() >= u32::MAX as usize {
            return Err(MerkleDropError::ArithmeticOverflow);
        }
        let index = self.periods.len() as u32;

        self.periods.push(Period::new(index, root, timestamp));
        Ok(index)
    }

    pub fn get_period(&self, index: u32) -> Result<&Period> {
        self.periods
            .get(index as usize)
            .ok_or(MerkleDropError::PeriodNotFound {
                index,
                period_count: self.len(),
            })
    }

    fn get_period_mut(&mut self, index: u32) -> Result<&mut Period> {
        let period_count = self.len();
        self.periods
            .get_mut(index as usize)
            .ok_or(MerkleDropError::PeriodNotFound { index, period_count })
    }

    /// Marks `recipient` as paid `amount` in period `index`.
    pub fn record_claim(&mut self, index: u32, recipient: Pubkey, amount: u64) -> Result<()> {
        self.get_period_mut(index)?.record_claim(recipient, amount)
    }

    pub(crate) fn revert_claim(&mut self, index: u32, recipient: &Pubkey) -> Option<u64> {
        self.periods
            .get_mut(index as usize)
            .and_then(|period| period.revert_claim(recipient))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }
}
