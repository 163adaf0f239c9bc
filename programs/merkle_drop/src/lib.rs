//! Merkle Drop Engine
//!
//! Distributes a fixed token supply over a sequence of claim periods. Each
//! period publishes one merkle root over its (recipient, amount) entitlements
//! and recipients redeem their entry once by presenting a merkle proof.
//!
//! Key Features:
//! - Keccak-256 sorted-pair merkle proofs, compatible with off-line tree builders
//! - Append-only periods with a minimum spacing and a start time
//! - One claim per (period, recipient), paid for exactly the leaf amount
//! - Global supply ceiling shared by every period
//! - All-or-nothing multi-period claims
//! - Controller-triggered recovery of the unclaimed remainder
//! - Payouts split across a fixed set of fund classes (shares, loot, token)
//!
//! Architecture:
//! - `MerkleDrop`: public entry point, serializes writers behind one lock
//! - `instructions`: one handler per operation
//! - `state`: configuration, periods with their claim ledgers, running totals
//! - `ControllerGuard` / `ExternalLedger` / `ClockSource`: injected collaborators
//!
//! Workflow:
//! 1. Build a `DistributionConfig` and create the engine
//! 2. Controller adds periods as roots become available
//! 3. Recipients claim with proofs, singly or in batches
//! 4. Controller recovers what is left once the recovery policy opens

pub mod clock;
pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod guard;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

pub use clock::{ClockSource, SystemClock};
pub use engine::MerkleDrop;
pub use error::{MerkleDropError, Result};
pub use guard::{ControllerGuard, SingleController};
pub use instructions::VerifiedClaim;
pub use ledger::{ExternalLedger, LedgerError};
pub use state::{DistributionConfig, PayoutTarget, Period, RecoveryPolicy};
