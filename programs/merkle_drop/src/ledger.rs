use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::state::PayoutTarget;

/// Failure reported by the external ledger for a single payout leg.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct LedgerError {
    pub reason: String,
}

impl LedgerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/**
 * External token ledger
 *
 * Moves balances on the engine's command. The engine calls `payout` at most
 * once per leg of a committed claim and never retries on its own; `reclaim`
 * is only used to reverse legs of an operation that failed part-way.
 */
pub trait ExternalLedger: Send + Sync {
    /// Delivers `amount` of `target` to `recipient` (mint or transfer).
    fn payout(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> Result<(), LedgerError>;

    /// Takes back a previously delivered leg (burn or transfer back).
    fn reclaim(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> Result<(), LedgerError>;
}

impl<T: ExternalLedger + ?Sized> ExternalLedger for Arc<T> {
    fn payout(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> Result<(), LedgerError> {
        (**self).payout(recipient, amount, target)
    }

    fn reclaim(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> Result<(), LedgerError> {
        (**self).reclaim(recipient, amount, target)
    }
}
