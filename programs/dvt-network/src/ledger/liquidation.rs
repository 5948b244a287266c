use std::ops::{Deref, DerefMut};
use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::helpers::math::*;
use crate::state::{Cluster, NetworkState, Operator};

/// True when an active cluster with validators cannot cover either the
/// collateral floor or the minimum runway at its current burn rate.
/// Evaluated on the projected balance at `block`.
pub fn is_liquidatable<O: Deref<Target = Operator>>(
    cluster: &Cluster,
    operators: &[O],
    network: &NetworkState,
    block: u64,
) -> Result<bool> {
    let balance = cluster.balance_at(operators, network, block)?;
    is_liquidatable_with_balance(cluster, balance, operators, network)
}

/// Eligibility if the cluster held `balance`; lets callers test a
/// transition before committing it
pub fn is_liquidatable_with_balance<O: Deref<Target = Operator>>(
    cluster: &Cluster,
    balance: u64,
    operators: &[O],
    network: &NetworkState,
) -> Result<bool> {
    if !cluster.active || cluster.validator_count == 0 {
        return Ok(false);
    }
    let threshold = liquidation_threshold(
        cluster.burn_rate(operators, network)?,
        network.params.minimum_blocks_before_liquidation,
    );
    Ok(balance < network.params.minimum_liquidation_collateral || (balance as u128) < threshold)
}

/// Deactivates an eligible cluster and returns the bounty owed to the caller
///
/// The bounty is the whole remaining balance after settling.
pub fn liquidate<O: DerefMut<Target = Operator>>(
    cluster: &mut Cluster,
    operators: &mut [O],
    network: &mut NetworkState,
    block: u64,
) -> Result<u64> {
    require!(cluster.active, ErrorCode::ClusterIsLiquidated);
    require!(
        is_liquidatable(cluster, operators, network, block)?,
        ErrorCode::ClusterNotLiquidatable
    );

    cluster.settle(operators, network, block)?;
    let count = cluster.validator_count;
    for operator in operators.iter_mut() {
        operator.remove_validators(count, block)?;
    }
    network.remove_validators(count, block)?;

    let payout = cluster.balance;
    cluster.balance = 0;
    cluster.active = false;

    #[cfg(feature = "verbose")]
    msg!("Cluster liquidated: validators={} bounty={}", count, payout);

    Ok(payout)
}

/// Re-enables a liquidated cluster with a fresh deposit
///
/// Indexes restart at `block`, so the liquidated period is never charged.
pub fn reactivate<O: DerefMut<Target = Operator>>(
    cluster: &mut Cluster,
    operators: &mut [O],
    network: &mut NetworkState,
    amount: u64,
    block: u64,
) -> Result<()> {
    require!(!cluster.active, ErrorCode::ClusterAlreadyEnabled);

    cluster.balance = checked_add(cluster.balance, amount)?;
    cluster.active = true;
    cluster.refresh_indexes(operators, network, block)?;

    let count = cluster.validator_count;
    let limit = network.params.validators_per_operator_limit;
    for operator in operators.iter_mut().filter(|operator| operator.active) {
        operator.add_validators(count, limit, block)?;
    }
    network.add_validators(count, block)?;

    require!(
        !is_liquidatable(cluster, operators, network, block)?,
        ErrorCode::InsufficientBalance
    );
    Ok(())
}
