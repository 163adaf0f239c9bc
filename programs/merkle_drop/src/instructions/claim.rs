use anchor_lang::prelude::*;
use tracing::debug;

use crate::error::{MerkleDropError, Result};
use crate::event::*;
use crate::instructions::DropContext;
use crate::ledger::ExternalLedger;
use crate::utils::{leaf_hash, verify, PayoutJournal};

/**
 * A (period, recipient, amount) entry proven against its period's root
 *
 * Only `verify_claim` constructs one, so holding a `VerifiedClaim` means the
 * merkle proof already checked out. Period roots never change, which keeps
 * the proof valid until the claim is committed.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedClaim {
    period: u32,
    recipient: Pubkey,
    amount: u64,
}

impl VerifiedClaim {
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn recipient(&self) -> Pubkey {
        self.recipient
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/**
 * Checks a claim's merkle proof against the period root
 *
 * Pure function of its inputs, callers run it without holding any lock.
 *
 * Leaf: keccak256(recipient || amount_le)
 * Nodes: keccak256(min(a, b) || max(a, b))
 */
pub fn verify_claim(
    root: [u8; 32],
    period: u32,
    recipient: Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
) -> Result<VerifiedClaim> {
    if amount == 0 {
        return Err(MerkleDropError::InvalidAmount {
            period,
            recipient,
            amount,
        });
    }

    let leaf = leaf_hash(&recipient, amount);
    if !verify(proof, root, leaf) {
        return Err(MerkleDropError::InvalidProof {
            period,
            recipient,
            amount,
        });
    }

    Ok(VerifiedClaim {
        period,
        recipient,
        amount,
    })
}

/**
 * Commits a verified claim and pays it out
 *
 * @param ctx - Engine context holding the write lock
 * @param claim - Proof-checked claim
 * @returns the running total after this claim
 *
 * Process:
 * 1. Reject if the recipient already claimed this period
 * 2. Reject if the running total plus amount would pass the supply ceiling
 * 3. Record the claim and bump the running total
 * 4. Pay the amount split across the payout targets
 * 5. On ledger failure, take back any paid legs and undo step 3
 */
pub fn handle_claim<G, L>(ctx: DropContext<'_, G, L>, claim: VerifiedClaim) -> Result<u64>
where
    G: ?Sized,
    L: ExternalLedger + ?Sized,
{
    let VerifiedClaim {
        period,
        recipient,
        amount,
    } = claim;

    let total_claimed = ctx.state.commit_claim(period, recipient, amount)?;

    let mut journal = PayoutJournal::new(ctx.ledger);
    if let Err(cause) = journal.pay(&recipient, amount, &ctx.config.payout_targets) {
        // A failed unwind means funds left the ledger, so the record must stay
        journal.unwind()?;
        ctx.state.rollback_claim(period, &recipient);
        return Err(cause);
    }

    emit!(TokensClaimed {
        period,
        recipient,
        amount,
        total_claimed,
    });
    debug!(period, %recipient, amount, total_claimed, "claim paid");

    Ok(total_claimed)
}
