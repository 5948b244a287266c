use anchor_lang::prelude::*;
use crate::state::{ClusterSnapshot, NetworkParams};

// ══════════════════════════════════════════════════════════════════════════════
// NETWORK EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted once when the network state and vault are created
#[event]
pub struct NetworkInitialized {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub vault: Pubkey,
    pub network_fee: u64,
    pub slot: u64,
}

#[event]
pub struct NetworkFeeUpdated {
    pub old_fee: u64,
    pub new_fee: u64,
    pub slot: u64,
}

#[event]
pub struct NetworkEarningsWithdrawn {
    pub amount: u64,
    pub recipient: Pubkey,
    pub slot: u64,
}

/// Emitted when governance parameters change
#[event]
pub struct ParametersUpdated {
    pub params: NetworkParams,
    pub slot: u64,
}

/// Emitted when authority transfer is proposed
#[event]
pub struct AuthorityTransferProposed {
    pub current_authority: Pubkey,
    pub proposed_authority: Pubkey,
    pub slot: u64,
}

/// Emitted when the proposed authority accepts
#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub slot: u64,
}

// ══════════════════════════════════════════════════════════════════════════════
// OPERATOR EVENTS
// ══════════════════════════════════════════════════════════════════════════════

#[event]
pub struct OperatorAdded {
    pub operator_id: u64,
    pub owner: Pubkey,
    pub fee: u64,
    pub slot: u64,
}

#[event]
pub struct OperatorRemoved {
    pub operator_id: u64,
    pub payout: u64,
    pub slot: u64,
}

#[event]
pub struct OperatorWhitelistUpdated {
    pub operator_id: u64,
    pub whitelisted: Pubkey,
    pub slot: u64,
}

#[event]
pub struct OperatorFeeDeclared {
    pub operator_id: u64,
    pub fee: u64,
    pub approval_begin_block: u64,
    pub approval_end_block: u64,
    pub slot: u64,
}

#[event]
pub struct OperatorFeeDeclarationCancelled {
    pub operator_id: u64,
    pub slot: u64,
}

/// Emitted by both execute (after the window) and reduce (immediate)
#[event]
pub struct OperatorFeeExecuted {
    pub operator_id: u64,
    pub old_fee: u64,
    pub new_fee: u64,
    pub slot: u64,
}

#[event]
pub struct OperatorWithdrawn {
    pub operator_id: u64,
    pub owner: Pubkey,
    pub amount: u64,
    pub slot: u64,
}

// ══════════════════════════════════════════════════════════════════════════════
// CLUSTER EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// One per validator in a bulk registration
#[event]
pub struct ValidatorAdded {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub public_key: Vec<u8>,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}

#[event]
pub struct ValidatorRemoved {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub public_key: Vec<u8>,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}

/// Signal for operators to exit the validator from the beacon chain
#[event]
pub struct ValidatorExited {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub public_key: Vec<u8>,
    pub slot: u64,
}

#[event]
pub struct ClusterDeposited {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub amount: u64,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}

#[event]
pub struct ClusterWithdrawn {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub amount: u64,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}

#[event]
pub struct ClusterLiquidated {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub liquidator: Pubkey,
    pub bounty: u64,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}

#[event]
pub struct ClusterReactivated {
    pub owner: Pubkey,
    pub operator_ids: Vec<u64>,
    pub amount: u64,
    pub cluster: ClusterSnapshot,
    pub slot: u64,
}
