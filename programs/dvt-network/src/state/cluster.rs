use anchor_lang::prelude::*;
use crate::constants::MAX_CLUSTER_SIZE;

/// An owner's validators running on one fixed, sorted set of operators
///
/// `index` is the sum of member operator indexes observed at the last
/// checkpoint; the next checkpoint charges the difference against the
/// operators' current indexes.
///
/// PDA Seeds: ["cluster_v1", owner, cluster_key]
#[account]
pub struct Cluster {
    /// Wallet owning the cluster
    pub owner: Pubkey,

    /// sha256 of the operator ids (u64 LE, ascending)
    pub cluster_key: [u8; 32],

    /// Strictly increasing member operator ids
    pub operator_ids: Vec<u64>,

    /// Validators currently registered in this cluster
    pub validator_count: u32,

    /// Deposits minus burn as of the last checkpoint
    pub balance: u64,

    /// Sum of member operator indexes at the last checkpoint
    pub index: u64,

    /// Network fee index at the last checkpoint
    pub network_fee_index: u64,

    /// False while liquidated
    pub active: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Cluster {
    /// Account size calculation:
    /// - owner: 32, cluster_key: 32
    /// - operator_ids: 4 + 8 * 13 = 108
    /// - validator_count: 4, balance: 8, index: 8, network_fee_index: 8
    /// - active: 1, bump: 1
    /// Total: 202 bytes
    pub const LEN: usize = 32 + 32 + (4 + 8 * MAX_CLUSTER_SIZE) + 4 + 8 + 8 + 8 + 1 + 1;

    pub fn new(owner: Pubkey, cluster_key: [u8; 32], operator_ids: Vec<u64>, bump: u8) -> Self {
        Self {
            owner,
            cluster_key,
            operator_ids,
            validator_count: 0,
            balance: 0,
            index: 0,
            network_fee_index: 0,
            active: true,
            bump,
        }
    }

    /// True until the first validator registration writes the account
    pub fn is_uninitialized(&self) -> bool {
        self.owner == Pubkey::default()
    }

    pub fn snapshot(&self) -> ClusterSnapshot {
        ClusterSnapshot {
            validator_count: self.validator_count,
            network_fee_index: self.network_fee_index,
            index: self.index,
            active: self.active,
            balance: self.balance,
        }
    }
}

/// Cluster accounting fields carried by events
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterSnapshot {
    pub validator_count: u32,
    pub network_fee_index: u64,
    pub index: u64,
    pub active: bool,
    pub balance: u64,
}
