use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::program_error::ProgramError;
use thiserror::Error;

use crate::constants::ERROR_CODE_BASE;
use crate::state::PayoutTarget;

pub type Result<T> = std::result::Result<T, MerkleDropError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleDropError {
    // Access control errors
    #[error("{identity} is not permitted to perform this action")]
    Unauthorized { identity: Pubkey },

    // Period errors
    #[error("period {index} not found ({period_count} periods exist)")]
    PeriodNotFound { index: u32, period_count: u32 },
    #[error("period created at {timestamp} is out of order, earliest allowed is {earliest}")]
    OutOfOrder { timestamp: i64, earliest: i64 },
    #[error("merkle root must not be empty")]
    InvalidMerkleRoot,

    // Claim errors
    #[error("invalid proof for {recipient} claiming {amount} in period {period}")]
    InvalidProof {
        period: u32,
        recipient: Pubkey,
        amount: u64,
    },
    #[error("{recipient} already claimed {claimed} in period {period}")]
    AlreadyClaimed {
        period: u32,
        recipient: Pubkey,
        claimed: u64,
    },
    #[error("claim of {requested} exceeds supply ceiling {ceiling} ({total_claimed} claimed)")]
    SupplyExceeded {
        requested: u64,
        total_claimed: u64,
        ceiling: u64,
    },
    #[error("invalid amount {amount} for {recipient} in period {period}")]
    InvalidAmount {
        period: u32,
        recipient: Pubkey,
        amount: u64,
    },
    #[error("batch length mismatch: {periods} periods, {amounts} amounts, {proofs} proofs")]
    BatchLengthMismatch {
        periods: usize,
        amounts: usize,
        proofs: usize,
    },
    #[error("claim batch is empty")]
    EmptyBatch,

    // Recovery errors
    #[error("recovery not allowed before {eligible_at} (now {now})")]
    TooEarly { now: i64, eligible_at: i64 },
    #[error("recovery is disabled for this distribution")]
    RecoveryDisabled,
    #[error("nothing left to recover")]
    NothingToRecover,

    // Ledger errors
    #[error("payout of {amount} to {recipient} via {target} failed: {reason}")]
    PayoutFailed {
        recipient: Pubkey,
        amount: u64,
        target: PayoutTarget,
        reason: String,
    },
    #[error("payout to {recipient} partially delivered and could not be reversed: {reason}")]
    PayoutIncomplete { recipient: Pubkey, reason: String },

    // System level errors
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),
}

impl MerkleDropError {
    /// Stable numeric code, numbered like Anchor custom errors.
    pub fn code(&self) -> u32 {
        let offset = match self {
            Self::Unauthorized { .. } => 0,
            Self::PeriodNotFound { .. } => 1,
            Self::OutOfOrder { .. } => 2,
            Self::InvalidMerkleRoot => 3,
            Self::InvalidProof { .. } => 4,
            Self::AlreadyClaimed { .. } => 5,
            Self::SupplyExceeded { .. } => 6,
            Self::InvalidAmount { .. } => 7,
            Self::BatchLengthMismatch { .. } => 8,
            Self::EmptyBatch => 9,
            Self::TooEarly { .. } => 10,
            Self::RecoveryDisabled => 11,
            Self::NothingToRecover => 12,
            Self::PayoutFailed { .. } => 13,
            Self::PayoutIncomplete { .. } => 14,
            Self::InvalidConfig(_) => 15,
            Self::ArithmeticOverflow => 16,
            Self::ClockUnavailable(_) => 17,
        };
        ERROR_CODE_BASE + offset
    }
}

impl From<MerkleDropError> for ProgramError {
    fn from(e: MerkleDropError) -> Self {
        ProgramError::Custom(e.code())
    }
}
