use std::ops::{Deref, DerefMut};
use anchor_lang::prelude::*;
use crate::constants::MAX_VALIDATORS_PER_BATCH;
use crate::errors::ErrorCode;
use crate::helpers::ids::hash_operator_ids;
use crate::helpers::math::*;
use crate::state::{Cluster, NetworkState, Operator, Validator};
use super::liquidation::{is_liquidatable, is_liquidatable_with_balance};

/// Sum of member operator indexes at `block`
///
/// Removed members report their frozen index, so they add no new burn.
pub fn operators_index<O: Deref<Target = Operator>>(operators: &[O], block: u64) -> Result<u64> {
    operators
        .iter()
        .try_fold(0u64, |sum, operator| checked_add(sum, operator.current_index(block)?))
}

/// Sum of the fees of active members
pub fn operators_fee<O: Deref<Target = Operator>>(operators: &[O]) -> Result<u64> {
    operators
        .iter()
        .filter(|operator| operator.active)
        .try_fold(0u64, |sum, operator| checked_add(sum, operator.fee))
}

impl Cluster {
    /// Rejects a cluster key that was not derived from `operator_ids`
    pub fn verify_key(&self, operator_ids: &[u64]) -> Result<()> {
        require!(
            self.cluster_key == hash_operator_ids(operator_ids)
                && self.operator_ids.as_slice() == operator_ids,
            ErrorCode::IncorrectClusterState
        );
        Ok(())
    }

    /// Burn accrued since the last checkpoint (zero while liquidated)
    pub fn pending_burn<O: Deref<Target = Operator>>(
        &self,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<u64> {
        if !self.active {
            return Ok(0);
        }
        let operator_delta = checked_sub(operators_index(operators, block)?, self.index)?;
        let network_delta = checked_sub(
            network.current_network_fee_index(block)?,
            self.network_fee_index,
        )?;
        scale_by_validators(checked_add(operator_delta, network_delta)?, self.validator_count)
    }

    /// Projected balance at `block`, floored at zero
    pub fn balance_at<O: Deref<Target = Operator>>(
        &self,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<u64> {
        Ok(self.balance.saturating_sub(self.pending_burn(operators, network, block)?))
    }

    /// Charges the pending burn and moves the cluster's indexes to `block`
    pub fn settle<O: Deref<Target = Operator>>(
        &mut self,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        let burn = self.pending_burn(operators, network, block)?;
        self.balance = self.balance.saturating_sub(burn);
        self.refresh_indexes(operators, network, block)?;

        #[cfg(feature = "verbose")]
        msg!("Cluster settle: burned={} balance={}", burn, self.balance);

        Ok(())
    }

    /// Moves the indexes to `block` without charging anything
    pub fn refresh_indexes<O: Deref<Target = Operator>>(
        &mut self,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<()> {
        self.index = operators_index(operators, block)?;
        self.network_fee_index = network.current_network_fee_index(block)?;
        Ok(())
    }

    /// Tokens burned per slot at current fees
    pub fn burn_rate<O: Deref<Target = Operator>>(
        &self,
        operators: &[O],
        network: &NetworkState,
    ) -> Result<u64> {
        let per_validator = checked_add(operators_fee(operators)?, network.network_fee)?;
        scale_by_validators(per_validator, self.validator_count)
    }

    /// Adds `amount`; a liquidated cluster accepts deposits ahead of reactivation
    pub fn deposit<O: Deref<Target = Operator>>(
        &mut self,
        amount: u64,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.settle(operators, network, block)?;
        self.balance = checked_add(self.balance, amount)?;
        Ok(())
    }

    /// Removes `amount` after settling; an active cluster with validators must
    /// stay clear of the liquidation threshold
    pub fn withdraw<O: Deref<Target = Operator>>(
        &mut self,
        amount: u64,
        operators: &[O],
        network: &NetworkState,
        block: u64,
    ) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.settle(operators, network, block)?;
        require!(self.balance >= amount, ErrorCode::InsufficientBalance);
        let remaining = checked_sub(self.balance, amount)?;
        require!(
            !is_liquidatable_with_balance(self, remaining, operators, network)?,
            ErrorCode::InsufficientBalance
        );
        self.balance = remaining;
        Ok(())
    }
}

fn validate_batch(count: u32) -> Result<()> {
    require!(
        count > 0 && count as usize <= MAX_VALIDATORS_PER_BATCH,
        ErrorCode::InvalidValidatorBatch
    );
    Ok(())
}

/// Adds `count` validators funded by `amount`
///
/// Settles first, bumps cluster, operator and network counts, then rejects
/// the registration if the cluster is left liquidatable.
pub fn register_validators<O: DerefMut<Target = Operator>>(
    cluster: &mut Cluster,
    operators: &mut [O],
    network: &mut NetworkState,
    count: u32,
    amount: u64,
    caller: &Pubkey,
    block: u64,
) -> Result<()> {
    validate_batch(count)?;
    require!(cluster.active, ErrorCode::ClusterIsLiquidated);
    for operator in operators.iter() {
        require!(operator.active, ErrorCode::OperatorDoesNotExist);
        require!(operator.is_authorized(caller), ErrorCode::CallerNotWhitelisted);
    }

    cluster.settle(operators, network, block)?;
    cluster.balance = checked_add(cluster.balance, amount)?;

    let limit = network.params.validators_per_operator_limit;
    for operator in operators.iter_mut() {
        operator.add_validators(count, limit, block)?;
    }
    network.add_validators(count, block)?;
    cluster.validator_count = cluster
        .validator_count
        .checked_add(count)
        .ok_or(ErrorCode::MathOverflow)?;

    require!(
        !is_liquidatable(cluster, operators, network, block)?,
        ErrorCode::InsufficientBalance
    );
    Ok(())
}

/// Removes `count` validators
///
/// A liquidated cluster already released its operator and network counts,
/// so only its own count moves.
pub fn remove_validators<O: DerefMut<Target = Operator>>(
    cluster: &mut Cluster,
    operators: &mut [O],
    network: &mut NetworkState,
    count: u32,
    block: u64,
) -> Result<()> {
    validate_batch(count)?;
    require!(cluster.validator_count >= count, ErrorCode::ValidatorDoesNotExist);

    if cluster.active {
        cluster.settle(operators, network, block)?;
        for operator in operators.iter_mut() {
            operator.remove_validators(count, block)?;
        }
        network.remove_validators(count, block)?;
    }
    cluster.validator_count -= count;
    Ok(())
}

impl Validator {
    pub fn mark_exited(&mut self) -> Result<()> {
        require!(!self.exited, ErrorCode::ValidatorAlreadyExited);
        self.exited = true;
        Ok(())
    }
}
