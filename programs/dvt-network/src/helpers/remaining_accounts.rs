use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::{Operator, Validator};
use super::cpi::create_pda_account;
use super::ids::hash_validator_public_key;

// Cluster instructions receive member operators (and validators, where
// relevant) through `remaining_accounts`: operators first, in the cluster's
// id order, then validators in the order of the public keys argument.

/// Loads member operators from the leading remaining accounts
pub fn load_operators<'info>(
    accounts: &'info [AccountInfo<'info>],
    operator_ids: &[u64],
    writable: bool,
) -> Result<Vec<Account<'info, Operator>>> {
    require!(accounts.len() >= operator_ids.len(), ErrorCode::OperatorAccountMismatch);

    let mut operators = Vec::with_capacity(operator_ids.len());
    for (operator_id, info) in operator_ids.iter().zip(accounts.iter()) {
        require!(!writable || info.is_writable, ErrorCode::OperatorAccountMismatch);
        let operator = Account::<'info, Operator>::try_from(info)?;
        require!(operator.id == *operator_id, ErrorCode::OperatorAccountMismatch);
        operators.push(operator);
    }
    Ok(operators)
}

/// Writes mutated operators back to account data
pub fn persist_operators(operators: &[Account<'_, Operator>]) -> Result<()> {
    for operator in operators {
        operator.exit(&crate::ID)?;
    }
    Ok(())
}

/// Creates the validator PDA for `public_key`, failing if it already exists
pub fn create_validator<'info>(
    info: &'info AccountInfo<'info>,
    public_key: &[u8],
    owner: &Signer<'info>,
    cluster: Pubkey,
    system_program: &Program<'info, System>,
) -> Result<[u8; 32]> {
    let public_key_hash = hash_validator_public_key(public_key)?;
    let (expected, bump) =
        Pubkey::find_program_address(&[VALIDATOR_SEED, &public_key_hash], &crate::ID);
    require_keys_eq!(*info.key, expected, ErrorCode::ValidatorAccountMismatch);
    require!(info.data_is_empty(), ErrorCode::ValidatorAlreadyExists);

    let bump_seed = [bump];
    let seeds: &[&[u8]] = &[VALIDATOR_SEED, &public_key_hash, &bump_seed];
    create_pda_account(owner, info, system_program, 8 + Validator::LEN, seeds)?;

    let validator = Validator {
        owner: owner.key(),
        cluster,
        public_key_hash,
        exited: false,
        bump,
    };
    let mut data = info.try_borrow_mut_data()?;
    validator.try_serialize(&mut &mut data[..])?;

    Ok(public_key_hash)
}

/// Loads a batch of existing validators owned by `owner` in `cluster`
pub fn load_validators<'info>(
    accounts: &'info [AccountInfo<'info>],
    public_keys: &[Vec<u8>],
    owner: &Pubkey,
    cluster: &Pubkey,
) -> Result<Vec<Account<'info, Validator>>> {
    require!(accounts.len() == public_keys.len(), ErrorCode::ValidatorAccountMismatch);

    let mut seen: Vec<Pubkey> = Vec::with_capacity(accounts.len());
    let mut validators = Vec::with_capacity(accounts.len());
    for (info, public_key) in accounts.iter().zip(public_keys.iter()) {
        require!(!seen.contains(info.key), ErrorCode::InvalidValidatorBatch);
        seen.push(*info.key);

        let public_key_hash = hash_validator_public_key(public_key)?;
        // Removed validators are closed, so an empty account means "does not exist"
        require!(!info.data_is_empty(), ErrorCode::ValidatorDoesNotExist);
        let validator = Account::<'info, Validator>::try_from(info)?;
        require!(
            validator.public_key_hash == public_key_hash,
            ErrorCode::ValidatorAccountMismatch
        );
        require!(
            validator.owner == *owner && validator.cluster == *cluster,
            ErrorCode::ValidatorDoesNotExist
        );
        validators.push(validator);
    }
    Ok(validators)
}
