use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use parking_lot::Mutex;

use crate::clock::ClockSource;
use crate::engine::MerkleDrop;
use crate::error::{MerkleDropError, Result};
use crate::guard::SingleController;
use crate::ledger::{ExternalLedger, LedgerError};
use crate::state::{DistributionConfig, PayoutTarget, RecoveryPolicy};
use crate::test::test_merkle::SimpleMerkleTree;

pub const START: i64 = 1_700_000_000;
pub const PERIOD_LENGTH: i64 = 7 * 24 * 60 * 60;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
    stopped: AtomicBool,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Every later read fails with `ClockUnavailable`.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl ClockSource for ManualClock {
    fn unix_timestamp(&self) -> Result<i64> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(MerkleDropError::ClockUnavailable("clock stopped".into()));
        }
        Ok(self.now.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Default)]
struct LedgerLog {
    payouts: Vec<(Pubkey, u64, PayoutTarget)>,
    reclaims: Vec<(Pubkey, u64, PayoutTarget)>,
    payout_calls: usize,
    fail_payout_call: Option<usize>,
    fail_reclaims: bool,
}

/// In-memory ledger with failure injection.
#[derive(Debug, Default)]
pub struct MockLedger {
    log: Mutex<LedgerLog>,
}

impl MockLedger {
    /// Fail the payout call with this zero-based position (counting every call).
    pub fn fail_payout_call(&self, call: usize) {
        self.log.lock().fail_payout_call = Some(call);
    }

    pub fn fail_reclaims(&self) {
        self.log.lock().fail_reclaims = true;
    }

    /// Net amount delivered to `recipient` across every target.
    pub fn balance_of(&self, recipient: &Pubkey) -> u64 {
        let log = self.log.lock();
        let paid: u64 = log
            .payouts
            .iter()
            .filter(|(r, _, _)| r == recipient)
            .map(|(_, a, _)| a)
            .sum();
        let reclaimed: u64 = log
            .reclaims
            .iter()
            .filter(|(r, _, _)| r == recipient)
            .map(|(_, a, _)| a)
            .sum();
        paid - reclaimed
    }

    /// Net amount delivered to `recipient` in one fund class.
    pub fn balance_in(&self, recipient: &Pubkey, target: PayoutTarget) -> u64 {
        let log = self.log.lock();
        let paid: u64 = log
            .payouts
            .iter()
            .filter(|(r, _, t)| r == recipient && *t == target)
            .map(|(_, a, _)| a)
            .sum();
        let reclaimed: u64 = log
            .reclaims
            .iter()
            .filter(|(r, _, t)| r == recipient && *t == target)
            .map(|(_, a, _)| a)
            .sum();
        paid - reclaimed
    }

    /// Net amount delivered to everyone.
    pub fn total_delivered(&self) -> u64 {
        let log = self.log.lock();
        let paid: u64 = log.payouts.iter().map(|(_, a, _)| a).sum();
        let reclaimed: u64 = log.reclaims.iter().map(|(_, a, _)| a).sum();
        paid - reclaimed
    }

    pub fn payout_count(&self) -> usize {
        self.log.lock().payouts.len()
    }

    pub fn reclaim_count(&self) -> usize {
        self.log.lock().reclaims.len()
    }
}

impl ExternalLedger for MockLedger {
    fn payout(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> std::result::Result<(), LedgerError> {
        let mut log = self.log.lock();
        let call = log.payout_calls;
        log.payout_calls += 1;
        if log.fail_payout_call == Some(call) {
            return Err(LedgerError::new("injected payout failure"));
        }
        log.payouts.push((*recipient, amount, *target));
        Ok(())
    }

    fn reclaim(
        &self,
        recipient: &Pubkey,
        amount: u64,
        target: &PayoutTarget,
    ) -> std::result::Result<(), LedgerError> {
        let mut log = self.log.lock();
        if log.fail_reclaims {
            return Err(LedgerError::new("injected reclaim failure"));
        }
        log.reclaims.push((*recipient, amount, *target));
        Ok(())
    }
}

pub fn config(controller: Pubkey, total_supply: u64) -> DistributionConfig {
    DistributionConfig {
        controller,
        period_length: PERIOD_LENGTH,
        start_time: START,
        total_supply,
        payout_targets: vec![PayoutTarget::Shares],
        recovery: RecoveryPolicy::Disabled,
    }
}

pub type TestDrop = MerkleDrop<SingleController, Arc<MockLedger>, Arc<ManualClock>>;

pub struct Fixture {
    pub drop: TestDrop,
    pub ledger: Arc<MockLedger>,
    pub clock: Arc<ManualClock>,
    pub controller: Pubkey,
}

impl Fixture {
    pub fn new(total_supply: u64) -> Self {
        Self::with_config(|_| {}, total_supply)
    }

    pub fn with_config(customize: impl FnOnce(&mut DistributionConfig), total_supply: u64) -> Self {
        let controller = Pubkey::new_unique();
        let mut config = config(controller, total_supply);
        customize(&mut config);

        let ledger = Arc::new(MockLedger::default());
        let clock = Arc::new(ManualClock::new(START));
        let drop = MerkleDrop::with_configured_controller(config, ledger.clone(), clock.clone())
            .expect("valid test config");
        Self {
            drop,
            ledger,
            clock,
            controller,
        }
    }

    /// Adds a period over `entries`, moving the clock forward as far as needed.
    pub fn add_period(&self, entries: &[(Pubkey, u64)]) -> (u32, SimpleMerkleTree) {
        let tree = SimpleMerkleTree::from_entries(entries);
        if self.drop.period_count() > 0 {
            self.clock.advance(PERIOD_LENGTH);
        }
        let index = self
            .drop
            .add_period(tree.root(), &self.controller)
            .expect("period added");
        (index, tree)
    }
}
