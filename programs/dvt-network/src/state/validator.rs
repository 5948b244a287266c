use anchor_lang::prelude::*;

/// Registered validator
///
/// Created on registration and closed on removal, so a missing account
/// means the validator does not exist (or was already removed).
///
/// PDA Seeds: ["validator_v1", sha256(public_key)]
#[account]
pub struct Validator {
    /// Cluster owner that registered the validator
    pub owner: Pubkey,

    /// Cluster account the validator belongs to
    pub cluster: Pubkey,

    /// sha256 of the BLS public key
    pub public_key_hash: [u8; 32],

    /// Set once an exit has been signalled
    pub exited: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Validator {
    /// Account size: 32 + 32 + 32 + 1 + 1 = 98 bytes
    pub const LEN: usize = 32 + 32 + 32 + 1 + 1;
}
