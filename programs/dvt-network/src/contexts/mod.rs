use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs
//
// Cluster instructions take member operators (and validator PDAs) through
// `remaining_accounts`; see helpers::accounts.

// ══════════════════════════════════════════════════════════════════════════════
// NETWORK
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + NetworkState::LEN,
        seeds = [NETWORK_STATE_SEED],
        bump
    )]
    pub network_state: Box<Account<'info, NetworkState>>,

    /// CHECK: PDA signing every payout from the vault
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: AccountInfo<'info>,

    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Holds every cluster deposit until it is paid out
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED],
        bump,
        token::mint = token_mint,
        token::authority = vault_authority,
        token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// AuthorityControl - network fee, parameters, authority proposal
#[derive(Accounts)]
pub struct AuthorityControl<'info> {
    #[account(
        mut,
        seeds = [NETWORK_STATE_SEED],
        bump = network_state.bump,
        constraint = authority.key() == network_state.authority @ ErrorCode::UnauthorizedAccess
    )]
    pub network_state: Box<Account<'info, NetworkState>>,
    pub authority: Signer<'info>,
}

/// AcceptAuthorityTransfer - Proposed authority accepts (two-step transfer)
#[derive(Accounts)]
pub struct AcceptAuthorityTransfer<'info> {
    #[account(
        mut,
        seeds = [NETWORK_STATE_SEED],
        bump = network_state.bump,
        constraint = network_state.pending_authority.is_some() @ ErrorCode::NoPendingAuthorityTransfer,
        constraint = network_state.pending_authority == Some(new_authority.key()) @ ErrorCode::UnauthorizedAccess
    )]
    pub network_state: Box<Account<'info, NetworkState>>,
    pub new_authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct WithdrawNetworkEarnings<'info> {
    #[account(
        mut,
        seeds = [NETWORK_STATE_SEED],
        bump = network_state.bump,
        constraint = authority.key() == network_state.authority @ ErrorCode::UnauthorizedAccess
    )]
    pub network_state: Box<Account<'info, NetworkState>>,

    /// CHECK: Vault authority PDA
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = network_state.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = recipient.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub recipient: Box<InterfaceAccount<'info, TokenAccount>>,

    pub authority: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

// ══════════════════════════════════════════════════════════════════════════════
// OPERATORS
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(operator_id: u64)]
pub struct RegisterOperator<'info> {
    #[account(mut, seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Operator::LEN,
        seeds = [OPERATOR_SEED, operator_id.to_le_bytes().as_ref()],
        bump
    )]
    pub operator: Box<Account<'info, Operator>>,

    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// OperatorControl - owner-only operator changes without token movement
#[derive(Accounts)]
pub struct OperatorControl<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [OPERATOR_SEED, operator.id.to_le_bytes().as_ref()],
        bump = operator.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub operator: Box<Account<'info, Operator>>,

    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct DeclareOperatorFee<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        seeds = [OPERATOR_SEED, operator.id.to_le_bytes().as_ref()],
        bump = operator.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub operator: Box<Account<'info, Operator>>,

    /// Reused when a previous request expired without being executed
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + OperatorFeeRequest::LEN,
        seeds = [FEE_REQUEST_SEED, operator.id.to_le_bytes().as_ref()],
        bump
    )]
    pub fee_request: Box<Account<'info, OperatorFeeRequest>>,

    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// ResolveOperatorFee - execute or cancel; both close the request
#[derive(Accounts)]
pub struct ResolveOperatorFee<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [OPERATOR_SEED, operator.id.to_le_bytes().as_ref()],
        bump = operator.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub operator: Box<Account<'info, Operator>>,

    #[account(
        mut,
        close = owner,
        seeds = [FEE_REQUEST_SEED, operator.id.to_le_bytes().as_ref()],
        bump = fee_request.bump
    )]
    pub fee_request: Box<Account<'info, OperatorFeeRequest>>,

    #[account(mut)]
    pub owner: Signer<'info>,
}

/// OperatorPayout - withdraw earnings, withdraw all, remove operator
#[derive(Accounts)]
pub struct OperatorPayout<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [OPERATOR_SEED, operator.id.to_le_bytes().as_ref()],
        bump = operator.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub operator: Box<Account<'info, Operator>>,

    /// CHECK: Vault authority PDA
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = network_state.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = recipient.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub recipient: Box<InterfaceAccount<'info, TokenAccount>>,

    pub owner: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

// ══════════════════════════════════════════════════════════════════════════════
// CLUSTERS
// ══════════════════════════════════════════════════════════════════════════════

/// RegisterValidator - single and bulk registration
///
/// The cluster account is created on first use for its key.
#[derive(Accounts)]
#[instruction(operator_ids: Vec<u64>, cluster_key: [u8; 32])]
pub struct RegisterValidator<'info> {
    #[account(mut, seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Cluster::LEN,
        seeds = [CLUSTER_SEED, owner.key().as_ref(), cluster_key.as_ref()],
        bump
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = owner_token_account.mint == network_state.token_mint @ ErrorCode::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ ErrorCode::CallerNotOwner
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// RemoveValidator - single and bulk removal; validator rent goes to the owner
#[derive(Accounts)]
pub struct RemoveValidator<'info> {
    #[account(mut, seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    #[account(mut)]
    pub owner: Signer<'info>,
}

/// ExitValidator - single and bulk exit signalling
#[derive(Accounts)]
pub struct ExitValidator<'info> {
    #[account(
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    pub owner: Signer<'info>,
}

/// Deposit - anyone may fund any cluster
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub depositor_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub depositor: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    /// CHECK: Vault authority PDA
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = network_state.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = recipient.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub recipient: Box<InterfaceAccount<'info, TokenAccount>>,

    pub owner: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

/// Liquidate - permissionless; the caller collects the remaining balance
#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut, seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    /// CHECK: Vault authority PDA
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = network_state.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = liquidator_token_account.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub liquidator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub liquidator: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct Reactivate<'info> {
    #[account(mut, seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        mut,
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump,
        has_one = owner @ ErrorCode::CallerNotOwner
    )]
    pub cluster: Box<Account<'info, Cluster>>,

    #[account(mut, address = network_state.vault)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = network_state.token_mint)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = owner_token_account.mint == network_state.token_mint @ ErrorCode::MintMismatch
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub owner: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
}

// ══════════════════════════════════════════════════════════════════════════════
// READ-ONLY VIEWS
// ══════════════════════════════════════════════════════════════════════════════

/// Cluster queries; member operators follow in `remaining_accounts`
#[derive(Accounts)]
pub struct ClusterView<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,

    #[account(
        seeds = [CLUSTER_SEED, cluster.owner.as_ref(), cluster.cluster_key.as_ref()],
        bump = cluster.bump
    )]
    pub cluster: Box<Account<'info, Cluster>>,
}

#[derive(Accounts)]
pub struct OperatorView<'info> {
    #[account(
        seeds = [OPERATOR_SEED, operator.id.to_le_bytes().as_ref()],
        bump = operator.bump
    )]
    pub operator: Box<Account<'info, Operator>>,
}

#[derive(Accounts)]
pub struct FeeRequestView<'info> {
    #[account(
        seeds = [FEE_REQUEST_SEED, fee_request.operator_id.to_le_bytes().as_ref()],
        bump = fee_request.bump
    )]
    pub fee_request: Box<Account<'info, OperatorFeeRequest>>,
}

#[derive(Accounts)]
pub struct NetworkView<'info> {
    #[account(seeds = [NETWORK_STATE_SEED], bump = network_state.bump)]
    pub network_state: Box<Account<'info, NetworkState>>,
}
