use std::fmt;

use anchor_lang::prelude::*;

use crate::error::{MerkleDropError, Result};

/**
 * Fund class a payout is delivered into
 *
 * A distribution pays into a fixed set of targets chosen at configuration
 * time. The ledger decides what each class means (minting voting shares,
 * minting non-voting loot, or transferring a designated token).
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayoutTarget {
    /// Primary fund class (voting shares)
    Shares,
    /// Secondary fund class (non-voting loot)
    Loot,
    /// A designated external token, identified by its mint
    Token(Pubkey),
}

impl PayoutTarget {
    /// Builds the target set from the deployment switches.
    ///
    /// Order is fixed: shares, loot, then the custom token. A default key
    /// means no custom token was supplied.
    pub fn from_flags(
        drop_shares: bool,
        drop_loot: bool,
        custom_token: Option<Pubkey>,
    ) -> Vec<Self> {
        let mut targets = Vec::with_capacity(3);
        if drop_shares {
            targets.push(Self::Shares);
        }
        if drop_loot {
            targets.push(Self::Loot);
        }
        if let Some(mint) = custom_token.filter(|mint| *mint != Pubkey::default()) {
            targets.push(Self::Token(mint));
        }
        targets
    }
}

impl fmt::Display for PayoutTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shares => write!(f, "shares"),
            Self::Loot => write!(f, "loot"),
            Self::Token(mint) => write!(f, "token {mint}"),
        }
    }
}

/// When the controller may sweep the unclaimed remainder.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Unclaimed funds are never swept
    #[default]
    Disabled,
    /// The controller may sweep at any time
    Anytime,
    /// Sweeping opens at an absolute Unix timestamp
    NotBefore(i64),
    /// Sweeping opens once this many seconds pass without a new period
    /// (counted from the start time while no period exists)
    AfterIdle(i64),
}

/**
 * Distribution configuration
 *
 * Fixed when the engine is created and never modified afterwards, so it is
 * read without taking any lock.
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DistributionConfig {
    /// Identity allowed to add periods and trigger recovery
    pub controller: Pubkey,

    /// Minimum spacing in seconds between consecutive periods
    pub period_length: i64,

    /// Earliest Unix timestamp for the first period
    pub start_time: i64,

    /// Ceiling on the aggregate amount ever paid out
    pub total_supply: u64,

    /// Fund classes every payout is split across
    pub payout_targets: Vec<PayoutTarget>,

    /// Timing gate for sweeping unclaimed funds
    pub recovery: RecoveryPolicy,
}

impl DistributionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.controller == Pubkey::default() {
            return Err(MerkleDropError::InvalidConfig("controller must be set"));
        }
        if self.period_length <= 0 {
            return Err(MerkleDropError::InvalidConfig("period length must be positive"));
        }
        if self.start_time < 0 {
            return Err(MerkleDropError::InvalidConfig("start time must not be negative"));
        }
        if self.total_supply == 0 {
            return Err(MerkleDropError::InvalidConfig("total supply must be positive"));
        }
        if self.payout_targets.is_empty() {
            return Err(MerkleDropError::InvalidConfig("at least one payout target is required"));
        }
        for (i, target) in self.payout_targets.iter().enumerate() {
            if self.payout_targets[..i].contains(target) {
                return Err(MerkleDropError::InvalidConfig("payout targets must be distinct"));
            }
        }
        match self.recovery {
            RecoveryPolicy::AfterIdle(secs) if secs < 0 => Err(MerkleDropError::InvalidConfig(
                "recovery idle window must not be negative",
            )),
            _ => Ok(()),
        }
    }
}
