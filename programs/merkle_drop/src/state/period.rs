use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::error::{MerkleDropError, Result};

/**
 * One distribution round
 *
 * Holds the merkle root summarizing every (recipient, amount) entitlement for
 * the round and the claim ledger for it. The index, root and creation time are
 * fixed when the period is appended. Ledger entries only ever move from
 * unclaimed to a fixed non-zero amount.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Period {
    /// Zero-based position in the period store
    pub index: u32,

    /// Merkle root over the round's entitlements
    pub root: [u8; 32],

    /// Unix timestamp at which the period was appended
    pub created_at: i64,

    /// Amount paid to each recipient in this period
    /// - Absent means not claimed
    claimed: HashMap<Pubkey, u64>,
}

impl Period {
    pub(crate) fn new(index: u32, root: [u8; 32], created_at: i64) -> Self {
        Self {
            index,
            root,
            created_at,
            claimed: HashMap::new(),
        }
    }

    /// Amount already paid to `recipient` in this period, zero if unclaimed.
    pub fn claimed_amount(&self, recipient: &Pubkey) -> u64 {
        self.claimed.get(recipient).copied().unwrap_or(0)
    }

    pub fn is_claimed(&self, recipient: &Pubkey) -> bool {
        self.claimed_amount(recipient) != 0
    }

    /// Number of recipients that have claimed in this period.
    pub fn claim_count(&self) -> usize {
        self.claimed.len()
    }

    /// Sum of all amounts paid in this period.
    pub fn total_claimed(&self) -> u64 {
        self.claimed.values().sum()
    }

    pub fn claims(&self) -> impl Iterator<Item = (&Pubkey, u64)> {
        self.claimed.iter().map(|(recipient, amount)| (recipient, *amount))
    }

    /// Fails with `AlreadyClaimed` when the entry is already set.
    pub(crate) fn ensure_unclaimed(&self, recipient: &Pubkey) -> Result<()> {
        match self.claimed.get(recipient) {
            Some(&claimed) => Err(MerkleDropError::AlreadyClaimed {
                period: self.index,
                recipient: *recipient,
                claimed,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn record_claim(&mut self, recipient: Pubkey, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(MerkleDropError::InvalidAmount {
                period: self.index,
                recipient,
                amount,
            });
        }
        self.ensure_unclaimed(&recipient)?;
        self.claimed.insert(recipient, amount);
        Ok(())
    }

    /// Undo a claim recorded by the current operation before it was paid.
    pub(crate) fn revert_claim(&mut self, recipient: &Pubkey) -> Option<u64> {
        self.claimed.remove(recipient)
    }
}
