use anchor_lang::prelude::*;
use tracing::{info, warn};

use crate::constants::EMPTY_ROOT;
use crate::error::{MerkleDropError, Result};
use crate::event::*;
use crate::guard::ControllerGuard;
use crate::instructions::DropContext;

/**
 * Appends a new claim period
 *
 * @param ctx - Engine context holding the write lock
 * @param root - Merkle root over the period's (recipient, amount) entries
 * @param requester - Identity asking to add the period
 * @param now - Current Unix timestamp, becomes the period's creation time
 *
 * Validation Rules:
 * - Requester must pass the controller guard (checked before anything else)
 * - Root cannot be all zeros
 * - The first period cannot precede the start time
 * - Later periods must be at least one period length after the previous one
 *
 * The period is claimable as soon as this returns.
 */
pub fn handle_add_period<G, L>(
    ctx: DropContext<'_, G, L>,
    root: [u8; 32],
    requester: Pubkey,
    now: i64,
) -> Result<u32>
where
    G: ControllerGuard + ?Sized,
    L: ?Sized,
{
    if !ctx.guard.is_controller(&requester) {
        warn!(%requester, "add_period rejected: not the controller");
        return Err(MerkleDropError::Unauthorized {
            identity: requester,
        });
    }

    require_root(root)?;

    let index = ctx.state.store.create_period(root, now)?;

    emit!(PeriodAdded {
        index,
        root,
        created_at: now,
        controller: requester,
    });
    info!(index, created_at = now, "period added");

    Ok(index)
}

fn require_root(root: [u8; 32]) -> Result<()> {
    if root == EMPTY_ROOT {
        return Err(MerkleDropError::InvalidMerkleRoot);
    }
    Ok(())
}
