use anchor_lang::prelude::*;

/// Event emitted when the controller appends a period
#[event]
pub struct PeriodAdded {
    /// Zero-based index of the new period
    pub index: u32,
    /// Merkle root of the period's entitlements
    pub root: [u8; 32],
    /// Creation timestamp
    pub created_at: i64,
    /// Controller that added the period
    pub controller: Pubkey,
}

/// Event emitted when a single claim is paid
#[event]
pub struct TokensClaimed {
    /// Period the claim was made against
    pub period: u32,
    /// Address of the recipient
    pub recipient: Pubkey,
    /// Amount paid for this claim
    pub amount: u64,
    /// Total amount claimed across the distribution after this claim
    pub total_claimed: u64,
}

/// Event emitted when a multi-period claim is paid
#[event]
pub struct BatchClaimed {
    /// Address of the recipient
    pub recipient: Pubkey,
    /// Periods claimed, in request order
    pub periods: Vec<u32>,
    /// Sum paid across the batch
    pub amount: u64,
    /// Total amount claimed across the distribution after this batch
    pub total_claimed: u64,
}

/// Event emitted when unclaimed supply is swept
#[event]
pub struct SupplyRecovered {
    /// Controller that triggered recovery
    pub controller: Pubkey,
    /// Recipient of the swept funds
    pub recipient: Pubkey,
    /// Amount swept
    pub amount: u64,
    /// Ceiling left in force after the sweep
    pub supply_ceiling: u64,
}
