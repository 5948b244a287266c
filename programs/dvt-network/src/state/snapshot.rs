use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::helpers::math::{accrue, checked_add};

/// Cumulative per-validator fee index, advanced lazily.
///
/// Shared by operators (earnings) and the network (network fee). The index
/// at any slot is `index + (slot - block) * fee`, so nothing is written
/// between checkpoints.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSnapshot {
    /// Cumulative fee per validator as of `block`
    pub index: u64,

    /// Slot of the last checkpoint
    pub block: u64,
}

impl FeeSnapshot {
    /// Account size: 8 + 8 = 16 bytes
    pub const LEN: usize = 8 + 8;

    pub fn new(block: u64) -> Self {
        Self { index: 0, block }
    }

    /// Index at `block` for a rate of `fee` per slot since the checkpoint
    pub fn index_at(&self, fee: u64, block: u64) -> Result<u64> {
        let elapsed = block.checked_sub(self.block).ok_or(ErrorCode::MathOverflow)?;
        checked_add(self.index, accrue(fee, elapsed)?)
    }

    /// Moves the checkpoint to `block` and returns the realized index delta
    pub fn advance(&mut self, fee: u64, block: u64) -> Result<u64> {
        let index = self.index_at(fee, block)?;
        let delta = index.checked_sub(self.index).ok_or(ErrorCode::MathOverflow)?;
        self.index = index;
        self.block = block;
        Ok(delta)
    }
}
