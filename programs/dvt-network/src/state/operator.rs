use anchor_lang::prelude::*;
use super::FeeSnapshot;

/// Infrastructure provider charging a per-slot, per-validator fee
///
/// Earnings are realized into `balance` lazily: every change to `fee` or
/// `validator_count` first checkpoints the snapshot at the current slot.
///
/// PDA Seeds: ["operator_v1", id (u64 LE)]
#[account]
pub struct Operator {
    /// Sequential id, never reused
    pub id: u64,

    /// Registering wallet; only it may change fee, whitelist or remove
    pub owner: Pubkey,

    /// Fee per validator per slot (token base units)
    pub fee: u64,

    /// Active validators served across all active clusters
    pub validator_count: u32,

    /// Earnings index checkpoint
    pub snapshot: FeeSnapshot,

    /// Realized, withdrawable earnings as of `snapshot.block`
    pub balance: u64,

    /// Single address allowed to register validators (default = public operator)
    pub whitelisted: Pubkey,

    /// False once removed
    pub active: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Operator {
    /// Account size calculation:
    /// - id: 8, owner: 32, fee: 8, validator_count: 4
    /// - snapshot: 16, balance: 8, whitelisted: 32
    /// - active: 1, bump: 1, _reserved: 32
    /// Total: 142 bytes
    pub const LEN: usize = 8 + 32 + 8 + 4 + FeeSnapshot::LEN + 8 + 32 + 1 + 1 + 32;

    pub fn new(id: u64, owner: Pubkey, fee: u64, block: u64, bump: u8) -> Self {
        Self {
            id,
            owner,
            fee,
            validator_count: 0,
            snapshot: FeeSnapshot::new(block),
            balance: 0,
            whitelisted: Pubkey::default(),
            active: true,
            bump,
            _reserved: [0u8; 32],
        }
    }

    pub fn is_private(&self) -> bool {
        self.whitelisted != Pubkey::default()
    }
}
