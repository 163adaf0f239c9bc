use anchor_lang::prelude::Pubkey;
use parking_lot::RwLock;
use tracing::info;

use crate::clock::{ClockSource, SystemClock};
use crate::error::{MerkleDropError, Result};
use crate::guard::{ControllerGuard, SingleController};
use crate::instructions::*;
use crate::ledger::ExternalLedger;
use crate::state::{DistributionConfig, DropState, Period, PeriodStore};

/**
 * Merkle drop distribution engine
 *
 * Owns the period store and the running totals behind a single read/write
 * lock. Reads and proof verification run concurrently; every state change
 * (period creation, claim commit plus payout, recovery) runs under the write
 * lock, which makes the claim check, the ledger write and the payout one
 * indivisible step against the latest committed totals.
 *
 * Workflow:
 * 1. Controller adds a period with the root of that round's entitlements
 * 2. Recipients claim with a merkle proof, once per period
 * 3. Controller sweeps the unclaimed remainder once the recovery policy allows
 */
pub struct MerkleDrop<G, L, C = SystemClock> {
    config: DistributionConfig,
    guard: G,
    ledger: L,
    clock: C,
    state: RwLock<DropState>,
}

impl<L, C> MerkleDrop<SingleController, L, C>
where
    L: ExternalLedger,
    C: ClockSource,
{
    /// Engine whose controller guard admits only `config.controller`.
    pub fn with_configured_controller(
        config: DistributionConfig,
        ledger: L,
        clock: C,
    ) -> Result<Self> {
        let guard = SingleController(config.controller);
        Self::new(config, guard, ledger, clock)
    }
}

impl<G, L, C> MerkleDrop<G, L, C>
where
    G: ControllerGuard,
    L: ExternalLedger,
    C: ClockSource,
{
    pub fn new(config: DistributionConfig, guard: G, ledger: L, clock: C) -> Result<Self> {
        config.validate()?;

        let store = PeriodStore::new(config.start_time, config.period_length);
        let state = DropState::new(store, config.total_supply);
        info!(
            controller = %config.controller,
            total_supply = config.total_supply,
            start_time = config.start_time,
            period_length = config.period_length,
            targets = config.payout_targets.len(),
            "merkle drop initialized"
        );

        Ok(Self {
            config,
            guard,
            ledger,
            clock,
            state: RwLock::new(state),
        })
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Appends a period stamped with the current time and returns its index.
    pub fn add_period(&self, root: [u8; 32], requester: &Pubkey) -> Result<u32> {
        let mut state = self.state.write();
        let now = self.clock.unix_timestamp()?;
        handle_add_period(self.context(&mut state), root, *requester, now)
    }

    /// Checks a claim against its period root without changing any state.
    pub fn verify_claim(
        &self,
        period: u32,
        recipient: &Pubkey,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<VerifiedClaim> {
        let root = self.state.read().store.get_period(period)?.root;
        verify_claim(root, period, *recipient, amount, proof)
    }

    /// Claims `amount` for `recipient` in `period`; returns the running total.
    pub fn claim(
        &self,
        period: u32,
        recipient: &Pubkey,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<u64> {
        let verified = self.verify_claim(period, recipient, amount, proof)?;

        let mut state = self.state.write();
        handle_claim(self.context(&mut state), verified)
    }

    /// Claims several periods at once; either every claim is paid or none is.
    ///
    /// `periods`, `amounts` and `proofs` are matched by position. Returns the
    /// amount paid across the batch.
    pub fn claim_all<P>(
        &self,
        periods: &[u32],
        recipient: &Pubkey,
        amounts: &[u64],
        proofs: &[P],
    ) -> Result<u64>
    where
        P: AsRef<[[u8; 32]]>,
    {
        if periods.len() != amounts.len() || periods.len() != proofs.len() {
            return Err(MerkleDropError::BatchLengthMismatch {
                periods: periods.len(),
                amounts: amounts.len(),
                proofs: proofs.len(),
            });
        }
        if periods.is_empty() {
            return Err(MerkleDropError::EmptyBatch);
        }

        let roots = {
            let state = self.state.read();
            periods
                .iter()
                .map(|index| state.store.get_period(*index).map(|period| period.root))
                .collect::<Result<Vec<_>>>()?
        };
        let verified = periods
            .iter()
            .zip(roots)
            .zip(amounts.iter().zip(proofs))
            .map(|((period, root), (amount, proof))| {
                verify_claim(root, *period, *recipient, *amount, proof.as_ref())
            })
            .collect::<Result<Vec<_>>>()?;

        let mut state = self.state.write();
        handle_claim_all(self.context(&mut state), *recipient, &verified)
    }

    /// Sweeps the unclaimed remainder to `target_recipient`; returns the amount.
    pub fn recover(&self, requester: &Pubkey, target_recipient: &Pubkey) -> Result<u64> {
        let mut state = self.state.write();
        let now = self.clock.unix_timestamp()?;
        handle_recover(self.context(&mut state), *requester, *target_recipient, now)
    }

    // ===== READ-ONLY VIEWS =====

    pub fn period_count(&self) -> u32 {
        self.state.read().store.len()
    }

    /// Snapshot of a period, including its claim ledger.
    pub fn get_period(&self, index: u32) -> Result<Period> {
        self.state.read().store.get_period(index).cloned()
    }

    pub fn claimed_amount(&self, period: u32, recipient: &Pubkey) -> Result<u64> {
        Ok(self.state.read().store.get_period(period)?.claimed_amount(recipient))
    }

    pub fn is_claimed(&self, period: u32, recipient: &Pubkey) -> Result<bool> {
        Ok(self.claimed_amount(period, recipient)? != 0)
    }

    pub fn total_claimed(&self) -> u64 {
        self.state.read().total_claimed
    }

    /// Ceiling currently in force, lowered by recovery.
    pub fn supply_ceiling(&self) -> u64 {
        self.state.read().supply_ceiling
    }

    pub fn remaining_supply(&self) -> u64 {
        self.state.read().remaining()
    }

    pub fn total_recovered(&self) -> u64 {
        self.state.read().total_recovered
    }

    /// Timestamp from which `recover` is allowed, `None` if it never is.
    pub fn recovery_opens_at(&self) -> Result<Option<i64>> {
        recovery_opens_at(&self.config, &self.state.read())
    }

    fn context<'a>(&'a self, state: &'a mut DropState) -> DropContext<'a, G, L> {
        DropContext {
            config: &self.config,
            guard: &self.guard,
            ledger: &self.ledger,
            state,
        }
    }
}
