use anchor_lang::prelude::*;
use tracing::{info, warn};

use crate::error::{MerkleDropError, Result};
use crate::event::*;
use crate::guard::ControllerGuard;
use crate::instructions::DropContext;
use crate::ledger::ExternalLedger;
use crate::state::{DistributionConfig, DropState, RecoveryPolicy};
use crate::utils::PayoutJournal;

/// Timestamp from which recovery is allowed, `None` when it never is.
pub fn recovery_opens_at(config: &DistributionConfig, state: &DropState) -> Result<Option<i64>> {
    match config.recovery {
        RecoveryPolicy::Disabled => Ok(None),
        RecoveryPolicy::Anytime => Ok(Some(i64::MIN)),
        RecoveryPolicy::NotBefore(ts) => Ok(Some(ts)),
        RecoveryPolicy::AfterIdle(secs) => {
            let anchor = state
                .store
                .latest()
                .map_or(config.start_time, |period| period.created_at);
            anchor
                .checked_add(secs)
                .map(Some)
                .ok_or(MerkleDropError::ArithmeticOverflow)
        }
    }
}

/**
 * Sweeps the unclaimed remainder of the supply to `target_recipient`
 *
 * @param ctx - Engine context holding the write lock
 * @param requester - Identity asking for the sweep
 * @param target_recipient - Receiver of the swept funds
 * @param now - Current Unix timestamp, checked against the recovery policy
 * @returns the amount swept
 *
 * Validation Rules:
 * - Requester must pass the controller guard
 * - The configured recovery policy must have opened
 * - Something must remain between the running total and the ceiling
 *
 * A successful sweep lowers the supply ceiling to the running total, so no
 * claim can be paid from the swept funds afterwards. If the ledger fails the
 * ceiling is restored.
 */
pub fn handle_recover<G, L>(
    ctx: DropContext<'_, G, L>,
    requester: Pubkey,
    target_recipient: Pubkey,
    now: i64,
) -> Result<u64>
where
    G: ControllerGuard + ?Sized,
    L: ExternalLedger + ?Sized,
{
    if !ctx.guard.is_controller(&requester) {
        warn!(%requester, "recover rejected: not the controller");
        return Err(MerkleDropError::Unauthorized {
            identity: requester,
        });
    }

    let eligible_at =
        recovery_opens_at(ctx.config, ctx.state)?.ok_or(MerkleDropError::RecoveryDisabled)?;
    if now < eligible_at {
        return Err(MerkleDropError::TooEarly { now, eligible_at });
    }

    let amount = ctx.state.consume_remainder()?;

    let mut journal = PayoutJournal::new(ctx.ledger);
    let targets = &ctx.config.payout_targets;
    if let Err(cause) = journal.pay(&target_recipient, amount, targets) {
        journal.unwind()?;
        ctx.state.restore_remainder(amount);
        return Err(cause);
    }

    emit!(SupplyRecovered {
        controller: requester,
        recipient: target_recipient,
        amount,
        supply_ceiling: ctx.state.supply_ceiling,
    });
    info!(
        %target_recipient,
        amount,
        supply_ceiling = ctx.state.supply_ceiling,
        "unclaimed supply recovered"
    );

    Ok(amount)
}
