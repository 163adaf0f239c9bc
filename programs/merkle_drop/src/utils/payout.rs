use anchor_lang::prelude::Pubkey;
use tracing::{error, warn};

use crate::error::{MerkleDropError, Result};
use crate::ledger::ExternalLedger;
use crate::state::PayoutTarget;

/// One transfer of a payout into a single fund class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutLeg {
    pub target: PayoutTarget,
    pub amount: u64,
}

/// Splits `amount` evenly across `targets`.
///
/// The first target also takes the division remainder and zero legs are
/// dropped, so the legs always sum to `amount`.
pub fn split_payout(amount: u64, targets: &[PayoutTarget]) -> Vec<PayoutLeg> {
    let Some(count) = u64::try_from(targets.len()).ok().filter(|n| *n > 0) else {
        return Vec::new();
    };
    let share = amount / count;
    let remainder = amount % count;

    targets
        .iter()
        .enumerate()
        .map(|(i, target)| PayoutLeg {
            target: *target,
            amount: if i == 0 { share + remainder } else { share },
        })
        .filter(|leg| leg.amount > 0)
        .collect()
}

/// Legs an unwind could not take back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandedPayout {
    /// Journal entries (one per `pay` call, zero-based) that still hold
    /// delivered funds
    pub entries: Vec<usize>,
    /// First reclaim failure, as `PayoutIncomplete`
    pub error: MerkleDropError,
}

impl From<StrandedPayout> for MerkleDropError {
    fn from(stranded: StrandedPayout) -> Self {
        stranded.error
    }
}

/**
 * Record of ledger legs paid by the current operation
 *
 * Every successful leg is journaled under the entry of the `pay` call that
 * delivered it, so that a failure later in the same claim, batch or recovery
 * can take the earlier legs back before the engine rolls back its own
 * records. Entries are numbered in call order starting at zero.
 */
pub struct PayoutJournal<'a, L: ExternalLedger + ?Sized> {
    ledger: &'a L,
    paid: Vec<(usize, Pubkey, PayoutLeg)>,
    entries: usize,
}

impl<'a, L: ExternalLedger + ?Sized> PayoutJournal<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            paid: Vec::new(),
            entries: 0,
        }
    }

    /// Pays `amount` to `recipient` split across `targets` as one entry.
    ///
    /// Stops at the first failing leg and reports it as `PayoutFailed`.
    pub fn pay(
        &mut self,
        recipient: &Pubkey,
        amount: u64,
        targets: &[PayoutTarget],
    ) -> Result<()> {
        let entry = self.entries;
        self.entries += 1;
        for leg in split_payout(amount, targets) {
            if let Err(e) = self.ledger.payout(recipient, leg.amount, &leg.target) {
                warn!(
                    %recipient,
                    amount = leg.amount,
                    target = %leg.target,
                    reason = %e,
                    "ledger payout failed"
                );
                return Err(MerkleDropError::PayoutFailed {
                    recipient: *recipient,
                    amount: leg.amount,
                    target: leg.target,
                    reason: e.reason,
                });
            }
            self.paid.push((entry, *recipient, leg));
        }
        Ok(())
    }

    /// Reverses every journaled leg, newest first.
    ///
    /// All legs are attempted even if one fails. Entries with a leg that
    /// could not be reclaimed are reported along with the first failure.
    pub fn unwind(self) -> std::result::Result<(), StrandedPayout> {
        let mut first_failure = None;
        let mut stranded: Vec<usize> = Vec::new();
        for (entry, recipient, leg) in self.paid.into_iter().rev() {
            if let Err(e) = self.ledger.reclaim(&recipient, leg.amount, &leg.target) {
                error!(
                    %recipient,
                    amount = leg.amount,
                    target = %leg.target,
                    reason = %e,
                    "failed to reverse payout leg"
                );
                if !stranded.contains(&entry) {
                    stranded.push(entry);
                }
                first_failure.get_or_insert(MerkleDropError::PayoutIncomplete {
                    recipient,
                    reason: e.reason,
                });
            }
        }
        match first_failure {
            Some(error) => {
                stranded.sort_unstable();
                Err(StrandedPayout {
                    entries: stranded,
                    error,
                })
            }
            None => Ok(()),
        }
    }
}
