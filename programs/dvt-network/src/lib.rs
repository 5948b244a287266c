use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod ledger;
pub mod state;


#[cfg(test)]
mod formal_verification;

use constants::*;
use contexts::*;
use errors::ErrorCode;
use events::*;
use helpers::*;
use state::*;

declare_id!("msKxUXMC2T3KZgLH7GjoRSbaUQvHnL8HqU16gn3T8k5");

fn batch_len(public_keys: &[Vec<u8>]) -> Result<u32> {
    require!(
        !public_keys.is_empty() && public_keys.len() <= MAX_VALIDATORS_PER_BATCH,
        ErrorCode::InvalidValidatorBatch
    );
    Ok(public_keys.len() as u32)
}

/// Shared by single and bulk registration
#[inline(never)]
fn process_register_validators<'info>(
    ctx: Context<'_, '_, 'info, 'info, RegisterValidator<'info>>,
    operator_ids: Vec<u64>,
    cluster_key: [u8; 32],
    public_keys: Vec<Vec<u8>>,
    amount: u64,
) -> Result<()> {
    validate_operator_ids(&operator_ids)?;
    require!(
        hash_operator_ids(&operator_ids) == cluster_key,
        ErrorCode::IncorrectClusterState
    );
    let count = batch_len(&public_keys)?;
    let block = current_block()?;
    let owner = ctx.accounts.owner.key();
    let cluster_address = ctx.accounts.cluster.key();
    let cluster_bump = ctx.bumps.cluster;

    let remaining: &'info [AccountInfo<'info>] = ctx.remaining_accounts;
    require!(
        remaining.len() == operator_ids.len() + public_keys.len(),
        ErrorCode::InvalidValidatorBatch
    );
    let (operator_infos, validator_infos) = remaining.split_at(operator_ids.len());
    let mut operators = load_operators(operator_infos, &operator_ids, true)?;

    let cluster = &mut ctx.accounts.cluster;
    if cluster.is_uninitialized() {
        cluster.set_inner(Cluster::new(owner, cluster_key, operator_ids.clone(), cluster_bump));
    } else {
        cluster.verify_key(&operator_ids)?;
    }

    let network = &mut ctx.accounts.network_state;
    ledger::register_validators(cluster, &mut operators, network, count, amount, &owner, block)?;
    persist_operators(&operators)?;

    for (info, public_key) in validator_infos.iter().zip(public_keys.iter()) {
        create_validator(
            info,
            public_key,
            &ctx.accounts.owner,
            cluster_address,
            &ctx.accounts.system_program,
        )?;
    }

    deposit_to_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.token_mint,
        &ctx.accounts.owner,
        amount,
    )?;

    let snapshot = ctx.accounts.cluster.snapshot();
    for public_key in public_keys {
        emit!(ValidatorAdded {
            owner,
            operator_ids: operator_ids.clone(),
            public_key,
            cluster: snapshot,
            slot: block,
        });
    }

    let (whole, frac) = format_tokens(amount);
    msg!(
        "Registered {} validator(s) on {:?}, deposit {}.{:09}, cluster validators {}",
        count, operator_ids, whole, frac, snapshot.validator_count
    );

    Ok(())
}

/// Shared by single and bulk removal
#[inline(never)]
fn process_remove_validators<'info>(
    ctx: Context<'_, '_, 'info, 'info, RemoveValidator<'info>>,
    public_keys: Vec<Vec<u8>>,
) -> Result<()> {
    let count = batch_len(&public_keys)?;
    let block = current_block()?;
    let owner = ctx.accounts.owner.key();
    let cluster_address = ctx.accounts.cluster.key();
    let operator_ids = ctx.accounts.cluster.operator_ids.clone();

    let remaining: &'info [AccountInfo<'info>] = ctx.remaining_accounts;
    require!(
        remaining.len() == operator_ids.len() + public_keys.len(),
        ErrorCode::InvalidValidatorBatch
    );
    let (operator_infos, validator_infos) = remaining.split_at(operator_ids.len());
    let mut operators = load_operators(operator_infos, &operator_ids, true)?;
    let validators = load_validators(validator_infos, &public_keys, &owner, &cluster_address)?;

    let cluster = &mut ctx.accounts.cluster;
    let network = &mut ctx.accounts.network_state;
    ledger::remove_validators(cluster, &mut operators, network, count, block)?;
    persist_operators(&operators)?;

    for validator in validators.iter() {
        validator.close(ctx.accounts.owner.to_account_info())?;
    }

    let snapshot = ctx.accounts.cluster.snapshot();
    for public_key in public_keys {
        emit!(ValidatorRemoved {
            owner,
            operator_ids: operator_ids.clone(),
            public_key,
            cluster: snapshot,
            slot: block,
        });
    }

    msg!("Removed {} validator(s), cluster validators {}", count, snapshot.validator_count);

    Ok(())
}

/// Shared by single and bulk exit
#[inline(never)]
fn process_exit_validators<'info>(
    ctx: Context<'_, '_, 'info, 'info, ExitValidator<'info>>,
    public_keys: Vec<Vec<u8>>,
) -> Result<()> {
    let count = batch_len(&public_keys)?;
    let block = current_block()?;
    let owner = ctx.accounts.owner.key();
    let cluster_address = ctx.accounts.cluster.key();

    let mut validators =
        load_validators(ctx.remaining_accounts, &public_keys, &owner, &cluster_address)?;
    for validator in validators.iter_mut() {
        validator.mark_exited()?;
        validator.exit(&crate::ID)?;
    }

    for public_key in public_keys {
        emit!(ValidatorExited {
            owner,
            operator_ids: ctx.accounts.cluster.operator_ids.clone(),
            public_key,
            slot: block,
        });
    }

    msg!("Exit signalled for {} validator(s)", count);

    Ok(())
}

#[program]
pub mod dvt_network {
    use super::*;

    // ══════════════════════════════════════════════════════════════════════════
    // NETWORK ADMINISTRATION
    // ══════════════════════════════════════════════════════════════════════════

    pub fn initialize(ctx: Context<Initialize>, network_fee: u64, params: NetworkParams) -> Result<()> {
        params.validate()?;
        validate_fee_precision(network_fee)?;
        let block = current_block()?;

        let mut state = NetworkState::new(
            ctx.accounts.authority.key(),
            ctx.accounts.token_mint.key(),
            ctx.accounts.vault.key(),
            network_fee,
            params,
            block,
        );
        state.vault_authority_bump = ctx.bumps.vault_authority;
        state.bump = ctx.bumps.network_state;
        ctx.accounts.network_state.set_inner(state);

        emit!(NetworkInitialized {
            authority: ctx.accounts.authority.key(),
            token_mint: ctx.accounts.token_mint.key(),
            vault: ctx.accounts.vault.key(),
            network_fee,
            slot: block,
        });

        msg!("Network initialized at slot {}, network fee {}", block, network_fee);
        Ok(())
    }

    pub fn update_network_fee(ctx: Context<AuthorityControl>, fee: u64) -> Result<()> {
        let block = current_block()?;
        let network = &mut ctx.accounts.network_state;
        let old_fee = network.network_fee;
        network.update_network_fee(fee, block)?;

        emit!(NetworkFeeUpdated { old_fee, new_fee: fee, slot: block });
        msg!("Network fee: {} -> {}", old_fee, fee);
        Ok(())
    }

    pub fn update_parameters(ctx: Context<AuthorityControl>, update: ParameterUpdate) -> Result<()> {
        let block = current_block()?;
        let network = &mut ctx.accounts.network_state;
        network.params = network.params.apply(&update)?;

        emit!(ParametersUpdated { params: network.params, slot: block });
        msg!("Parameters updated");
        Ok(())
    }

    pub fn withdraw_network_earnings(ctx: Context<WithdrawNetworkEarnings>, amount: u64) -> Result<()> {
        let block = current_block()?;
        ctx.accounts.network_state.withdraw_treasury(amount, block)?;

        payout_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.vault,
            &ctx.accounts.recipient,
            &ctx.accounts.token_mint,
            &ctx.accounts.vault_authority,
            ctx.accounts.network_state.vault_authority_bump,
            amount,
        )?;

        emit!(NetworkEarningsWithdrawn {
            amount,
            recipient: ctx.accounts.recipient.key(),
            slot: block,
        });

        let (whole, frac) = format_tokens(amount);
        msg!("Network earnings withdrawn: {}.{:09}", whole, frac);
        Ok(())
    }

    /// Step one of the authority handover; the proposed key must accept
    pub fn propose_authority_transfer(ctx: Context<AuthorityControl>, new_authority: Pubkey) -> Result<()> {
        let network = &mut ctx.accounts.network_state;
        network.pending_authority = Some(new_authority);

        emit!(AuthorityTransferProposed {
            current_authority: network.authority,
            proposed_authority: new_authority,
            slot: current_block()?,
        });

        msg!("Authority transfer proposed: {} -> {}", network.authority, new_authority);
        Ok(())
    }

    pub fn accept_authority_transfer(ctx: Context<AcceptAuthorityTransfer>) -> Result<()> {
        let network = &mut ctx.accounts.network_state;
        let old_authority = network.authority;
        let new_authority = network.pending_authority.ok_or(ErrorCode::NoPendingAuthorityTransfer)?;
        network.authority = new_authority;
        network.pending_authority = None;

        emit!(AuthorityTransferred {
            old_authority,
            new_authority,
            slot: current_block()?,
        });

        msg!("Authority transferred: {} -> {}", old_authority, new_authority);
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // OPERATORS
    // ══════════════════════════════════════════════════════════════════════════

    /// `operator_id` must be the next sequential id; it only seeds the PDA
    pub fn register_operator(ctx: Context<RegisterOperator>, operator_id: u64, fee: u64) -> Result<()> {
        let block = current_block()?;
        let owner = ctx.accounts.owner.key();
        let network = &mut ctx.accounts.network_state;

        let id = network.next_operator_id()?;
        require!(id == operator_id, ErrorCode::InvalidParameter);
        let operator = Operator::register(id, owner, fee, &network.params, block, ctx.bumps.operator)?;
        ctx.accounts.operator.set_inner(operator);

        emit!(OperatorAdded { operator_id: id, owner, fee, slot: block });
        msg!("Operator {} registered, fee {}", id, fee);
        Ok(())
    }

    pub fn remove_operator(ctx: Context<OperatorPayout>) -> Result<()> {
        let block = current_block()?;
        let operator = &mut ctx.accounts.operator;
        let operator_id = operator.id;
        let payout = operator.remove(block)?;

        payout_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.vault,
            &ctx.accounts.recipient,
            &ctx.accounts.token_mint,
            &ctx.accounts.vault_authority,
            ctx.accounts.network_state.vault_authority_bump,
            payout,
        )?;

        emit!(OperatorRemoved { operator_id, payout, slot: block });

        let (whole, frac) = format_tokens(payout);
        msg!("Operator {} removed, paid out {}.{:09}", operator_id, whole, frac);
        Ok(())
    }

    pub fn set_operator_whitelist(ctx: Context<OperatorControl>, address: Pubkey) -> Result<()> {
        let operator = &mut ctx.accounts.operator;
        operator.set_whitelist(address)?;

        emit!(OperatorWhitelistUpdated {
            operator_id: operator.id,
            whitelisted: address,
            slot: current_block()?,
        });

        msg!("Operator {} whitelist: {}", operator.id, address);
        Ok(())
    }

    pub fn declare_operator_fee(ctx: Context<DeclareOperatorFee>, fee: u64) -> Result<()> {
        let block = current_block()?;
        let request = &mut ctx.accounts.fee_request;
        ledger::declare_operator_fee(
            &ctx.accounts.operator,
            request,
            fee,
            &ctx.accounts.network_state.params,
            block,
        )?;
        request.bump = ctx.bumps.fee_request;

        emit!(OperatorFeeDeclared {
            operator_id: request.operator_id,
            fee,
            approval_begin_block: request.approval_begin_block,
            approval_end_block: request.approval_end_block,
            slot: block,
        });

        msg!(
            "Operator {} declared fee {}, executable in [{}, {}]",
            request.operator_id, fee, request.approval_begin_block, request.approval_end_block
        );
        Ok(())
    }

    pub fn execute_operator_fee(ctx: Context<ResolveOperatorFee>) -> Result<()> {
        let block = current_block()?;
        let operator = &mut ctx.accounts.operator;
        let old_fee = operator.fee;
        ledger::execute_operator_fee(
            operator,
            &ctx.accounts.fee_request,
            &ctx.accounts.network_state.params,
            block,
        )?;

        emit!(OperatorFeeExecuted {
            operator_id: operator.id,
            old_fee,
            new_fee: operator.fee,
            slot: block,
        });

        msg!("Operator {} fee: {} -> {}", operator.id, old_fee, operator.fee);
        Ok(())
    }

    pub fn cancel_declared_operator_fee(ctx: Context<ResolveOperatorFee>) -> Result<()> {
        ledger::cancel_declared_operator_fee(&ctx.accounts.operator, &ctx.accounts.fee_request)?;

        emit!(OperatorFeeDeclarationCancelled {
            operator_id: ctx.accounts.operator.id,
            slot: current_block()?,
        });

        msg!("Operator {} fee declaration cancelled", ctx.accounts.operator.id);
        Ok(())
    }

    pub fn reduce_operator_fee(ctx: Context<OperatorControl>, fee: u64) -> Result<()> {
        let block = current_block()?;
        let operator = &mut ctx.accounts.operator;
        let old_fee = operator.fee;
        ledger::reduce_operator_fee(operator, fee, &ctx.accounts.network_state.params, block)?;

        emit!(OperatorFeeExecuted {
            operator_id: operator.id,
            old_fee,
            new_fee: fee,
            slot: block,
        });

        msg!("Operator {} fee reduced: {} -> {}", operator.id, old_fee, fee);
        Ok(())
    }

    pub fn withdraw_operator_earnings(ctx: Context<OperatorPayout>, amount: u64) -> Result<()> {
        let block = current_block()?;
        ctx.accounts.operator.withdraw(amount, block)?;
        pay_operator(&ctx.accounts, amount, block)
    }

    pub fn withdraw_all_operator_earnings(ctx: Context<OperatorPayout>) -> Result<()> {
        let block = current_block()?;
        let amount = ctx.accounts.operator.withdraw_all(block)?;
        pay_operator(&ctx.accounts, amount, block)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // VALIDATORS
    // ══════════════════════════════════════════════════════════════════════════

    /// Remaining accounts: member operators (writable, id order), then the validator PDA
    pub fn register_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, RegisterValidator<'info>>,
        operator_ids: Vec<u64>,
        cluster_key: [u8; 32],
        public_key: Vec<u8>,
        amount: u64,
    ) -> Result<()> {
        process_register_validators(ctx, operator_ids, cluster_key, vec![public_key], amount)
    }

    pub fn bulk_register_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, RegisterValidator<'info>>,
        operator_ids: Vec<u64>,
        cluster_key: [u8; 32],
        public_keys: Vec<Vec<u8>>,
        amount: u64,
    ) -> Result<()> {
        process_register_validators(ctx, operator_ids, cluster_key, public_keys, amount)
    }

    pub fn remove_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, RemoveValidator<'info>>,
        public_key: Vec<u8>,
    ) -> Result<()> {
        process_remove_validators(ctx, vec![public_key])
    }

    pub fn bulk_remove_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, RemoveValidator<'info>>,
        public_keys: Vec<Vec<u8>>,
    ) -> Result<()> {
        process_remove_validators(ctx, public_keys)
    }

    /// Accounting is untouched; operators watch the event
    pub fn exit_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExitValidator<'info>>,
        public_key: Vec<u8>,
    ) -> Result<()> {
        process_exit_validators(ctx, vec![public_key])
    }

    pub fn bulk_exit_validator<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExitValidator<'info>>,
        public_keys: Vec<Vec<u8>>,
    ) -> Result<()> {
        process_exit_validators(ctx, public_keys)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // CLUSTER BALANCE
    // ══════════════════════════════════════════════════════════════════════════

    /// Remaining accounts: member operators in id order
    pub fn deposit<'info>(ctx: Context<'_, '_, 'info, 'info, Deposit<'info>>, amount: u64) -> Result<()> {
        let block = current_block()?;
        let operator_ids = ctx.accounts.cluster.operator_ids.clone();
        let operators = load_operators(ctx.remaining_accounts, &operator_ids, false)?;

        let cluster = &mut ctx.accounts.cluster;
        cluster.deposit(amount, &operators, &ctx.accounts.network_state, block)?;

        deposit_to_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.depositor_token_account,
            &ctx.accounts.vault,
            &ctx.accounts.token_mint,
            &ctx.accounts.depositor,
            amount,
        )?;

        emit!(ClusterDeposited {
            owner: ctx.accounts.cluster.owner,
            operator_ids,
            amount,
            cluster: ctx.accounts.cluster.snapshot(),
            slot: block,
        });

        let (whole, frac) = format_tokens(amount);
        msg!("Cluster deposit {}.{:09}", whole, frac);
        Ok(())
    }

    /// Remaining accounts: member operators in id order
    pub fn withdraw<'info>(ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>, amount: u64) -> Result<()> {
        let block = current_block()?;
        let operator_ids = ctx.accounts.cluster.operator_ids.clone();
        let operators = load_operators(ctx.remaining_accounts, &operator_ids, false)?;

        let cluster = &mut ctx.accounts.cluster;
        cluster.withdraw(amount, &operators, &ctx.accounts.network_state, block)?;

        payout_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.vault,
            &ctx.accounts.recipient,
            &ctx.accounts.token_mint,
            &ctx.accounts.vault_authority,
            ctx.accounts.network_state.vault_authority_bump,
            amount,
        )?;

        emit!(ClusterWithdrawn {
            owner: ctx.accounts.owner.key(),
            operator_ids,
            amount,
            cluster: ctx.accounts.cluster.snapshot(),
            slot: block,
        });

        let (whole, frac) = format_tokens(amount);
        msg!("Cluster withdrawal {}.{:09}", whole, frac);
        Ok(())
    }

    /// Remaining accounts: member operators (writable) in id order
    pub fn liquidate<'info>(ctx: Context<'_, '_, 'info, 'info, Liquidate<'info>>) -> Result<()> {
        let block = current_block()?;
        let operator_ids = ctx.accounts.cluster.operator_ids.clone();
        let mut operators = load_operators(ctx.remaining_accounts, &operator_ids, true)?;

        let cluster = &mut ctx.accounts.cluster;
        let network = &mut ctx.accounts.network_state;
        let bounty = ledger::liquidate(cluster, &mut operators, network, block)?;
        persist_operators(&operators)?;

        payout_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.vault,
            &ctx.accounts.liquidator_token_account,
            &ctx.accounts.token_mint,
            &ctx.accounts.vault_authority,
            ctx.accounts.network_state.vault_authority_bump,
            bounty,
        )?;

        emit!(ClusterLiquidated {
            owner: ctx.accounts.cluster.owner,
            operator_ids,
            liquidator: ctx.accounts.liquidator.key(),
            bounty,
            cluster: ctx.accounts.cluster.snapshot(),
            slot: block,
        });

        let (whole, frac) = format_tokens(bounty);
        msg!("Cluster liquidated, bounty {}.{:09}", whole, frac);
        Ok(())
    }

    /// Remaining accounts: member operators (writable) in id order
    pub fn reactivate<'info>(ctx: Context<'_, '_, 'info, 'info, Reactivate<'info>>, amount: u64) -> Result<()> {
        let block = current_block()?;
        let operator_ids = ctx.accounts.cluster.operator_ids.clone();
        let mut operators = load_operators(ctx.remaining_accounts, &operator_ids, true)?;

        let cluster = &mut ctx.accounts.cluster;
        let network = &mut ctx.accounts.network_state;
        ledger::reactivate(cluster, &mut operators, network, amount, block)?;
        persist_operators(&operators)?;

        deposit_to_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.owner_token_account,
            &ctx.accounts.vault,
            &ctx.accounts.token_mint,
            &ctx.accounts.owner,
            amount,
        )?;

        emit!(ClusterReactivated {
            owner: ctx.accounts.owner.key(),
            operator_ids,
            amount,
            cluster: ctx.accounts.cluster.snapshot(),
            slot: block,
        });

        let (whole, frac) = format_tokens(amount);
        msg!("Cluster reactivated with {}.{:09}", whole, frac);
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // QUERIES (return data, no writes)
    // ══════════════════════════════════════════════════════════════════════════

    pub fn get_operator_earnings(ctx: Context<OperatorView>) -> Result<u64> {
        ctx.accounts.operator.earnings_at(current_block()?)
    }

    pub fn get_operator_fee(ctx: Context<OperatorView>) -> Result<u64> {
        Ok(ctx.accounts.operator.fee)
    }

    /// Reports expired requests with `pending == false`
    pub fn get_operator_declared_fee(ctx: Context<FeeRequestView>) -> Result<DeclaredOperatorFee> {
        Ok(DeclaredOperatorFee::at(&ctx.accounts.fee_request, current_block()?))
    }

    /// Projected balance; a liquidated cluster reports its stored balance
    pub fn get_cluster_balance<'info>(ctx: Context<'_, '_, 'info, 'info, ClusterView<'info>>) -> Result<u64> {
        let operators = load_operators(ctx.remaining_accounts, &ctx.accounts.cluster.operator_ids, false)?;
        ctx.accounts
            .cluster
            .balance_at(&operators, &ctx.accounts.network_state, current_block()?)
    }

    pub fn get_burn_rate<'info>(ctx: Context<'_, '_, 'info, 'info, ClusterView<'info>>) -> Result<u64> {
        let operators = load_operators(ctx.remaining_accounts, &ctx.accounts.cluster.operator_ids, false)?;
        ctx.accounts.cluster.burn_rate(&operators, &ctx.accounts.network_state)
    }

    pub fn is_liquidatable<'info>(ctx: Context<'_, '_, 'info, 'info, ClusterView<'info>>) -> Result<bool> {
        let operators = load_operators(ctx.remaining_accounts, &ctx.accounts.cluster.operator_ids, false)?;
        ledger::is_liquidatable(
            &ctx.accounts.cluster,
            &operators,
            &ctx.accounts.network_state,
            current_block()?,
        )
    }

    /// Withdrawable treasury balance
    pub fn get_network_earnings(ctx: Context<NetworkView>) -> Result<u64> {
        ctx.accounts.network_state.treasury_balance(current_block()?)
    }

    pub fn get_network_fee(ctx: Context<NetworkView>) -> Result<u64> {
        Ok(ctx.accounts.network_state.network_fee)
    }
}

fn pay_operator(accounts: &OperatorPayout, amount: u64, block: u64) -> Result<()> {
    payout_from_vault(
        &accounts.token_program,
        &accounts.vault,
        &accounts.recipient,
        &accounts.token_mint,
        &accounts.vault_authority,
        accounts.network_state.vault_authority_bump,
        amount,
    )?;

    emit!(OperatorWithdrawn {
        operator_id: accounts.operator.id,
        owner: accounts.owner.key(),
        amount,
        slot: block,
    });

    let (whole, frac) = format_tokens(amount);
    msg!("Operator {} withdrew {}.{:09}", accounts.operator.id, whole, frac);
    Ok(())
}
