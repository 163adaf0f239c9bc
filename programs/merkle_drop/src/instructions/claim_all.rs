use std::collections::HashMap;

use anchor_lang::prelude::*;
use tracing::debug;

use crate::error::{MerkleDropError, Result};
use crate::event::*;
use crate::instructions::{DropContext, VerifiedClaim};
use crate::ledger::ExternalLedger;
use crate::utils::PayoutJournal;

/**
 * Commits a batch of verified claims for one recipient, all or nothing
 *
 * @param ctx - Engine context holding the write lock
 * @param recipient - Recipient every claim in the batch pays
 * @param claims - Proof-checked claims in request order
 * @returns the amount paid across the batch
 *
 * Phase 1 validates the whole batch against committed state without writing:
 * every period must be unclaimed, a period may appear only once, and the
 * batch total must fit under the supply ceiling. Phase 2 records and pays
 * every claim; a ledger failure takes back the legs already paid and rolls
 * every record of the batch back. When a leg cannot be taken back, only the
 * claims still holding delivered funds stay recorded.
 */
pub fn handle_claim_all<G, L>(
    ctx: DropContext<'_, G, L>,
    recipient: Pubkey,
    claims: &[VerifiedClaim],
) -> Result<u64>
where
    G: ?Sized,
    L: ExternalLedger + ?Sized,
{
    if claims.is_empty() {
        return Err(MerkleDropError::EmptyBatch);
    }

    // ===== VALIDATION PHASE =====

    let mut batch_amount = 0u64;
    let mut seen: HashMap<u32, u64> = HashMap::with_capacity(claims.len());
    for claim in claims {
        debug_assert_eq!(claim.recipient(), recipient);
        ctx.state
            .store
            .get_period(claim.period())?
            .ensure_unclaimed(&recipient)?;
        if let Some(&claimed) = seen.get(&claim.period()) {
            return Err(MerkleDropError::AlreadyClaimed {
                period: claim.period(),
                recipient,
                claimed,
            });
        }
        seen.insert(claim.period(), claim.amount());
        batch_amount = batch_amount
            .checked_add(claim.amount())
            .ok_or(MerkleDropError::ArithmeticOverflow)?;
    }
    ctx.state.checked_claim_total(batch_amount)?;

    // ===== COMMIT PHASE =====

    let mut committed: Vec<u32> = Vec::with_capacity(claims.len());
    for claim in claims {
        if let Err(e) = ctx.state.commit_claim(claim.period(), recipient, claim.amount()) {
            for period in &committed {
                ctx.state.rollback_claim(*period, &recipient);
            }
            return Err(e);
        }
        committed.push(claim.period());
    }

    let mut journal = PayoutJournal::new(ctx.ledger);
    for claim in claims {
        let targets = &ctx.config.payout_targets;
        if let Err(cause) = journal.pay(&recipient, claim.amount(), targets) {
            // Journal entries follow claim order, stranded entries keep their record
            let (stranded, error) = match journal.unwind() {
                Ok(()) => (Vec::new(), cause),
                Err(stranded) => (stranded.entries, stranded.error),
            };
            for (entry, period) in committed.iter().enumerate() {
                if !stranded.contains(&entry) {
                    ctx.state.rollback_claim(*period, &recipient);
                }
            }
            return Err(error);
        }
    }

    let total_claimed = ctx.state.total_claimed;
    emit!(BatchClaimed {
        recipient,
        periods: committed,
        amount: batch_amount,
        total_claimed,
    });
    debug!(
        %recipient,
        count = claims.len(),
        batch_amount,
        total_claimed,
        "batch claim paid"
    );

    Ok(batch_amount)
}
