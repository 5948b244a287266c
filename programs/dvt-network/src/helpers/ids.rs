use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use crate::constants::*;
use crate::errors::ErrorCode;

/// Checks a cluster's operator id list: supported size, strictly increasing
pub fn validate_operator_ids(operator_ids: &[u64]) -> Result<()> {
    require!(
        SUPPORTED_CLUSTER_SIZES.contains(&operator_ids.len()),
        ErrorCode::InvalidOperatorIdsLength
    );
    require!(operator_ids[0] > 0, ErrorCode::OperatorDoesNotExist);
    require!(
        operator_ids.windows(2).all(|pair| pair[0] < pair[1]),
        ErrorCode::UnsortedOperatorIds
    );
    Ok(())
}

/// Stable cluster key: sha256 over the ids as u64 LE
pub fn hash_operator_ids(operator_ids: &[u64]) -> [u8; 32] {
    let encoded: Vec<[u8; 8]> = operator_ids.iter().map(|id| id.to_le_bytes()).collect();
    let parts: Vec<&[u8]> = encoded.iter().map(|bytes| bytes.as_slice()).collect();
    hashv(&parts).to_bytes()
}

/// Validator PDA key: sha256 of the BLS public key
pub fn hash_validator_public_key(public_key: &[u8]) -> Result<[u8; 32]> {
    require!(
        public_key.len() == VALIDATOR_PUBLIC_KEY_LEN,
        ErrorCode::InvalidPublicKeyLength
    );
    Ok(hashv(&[public_key]).to_bytes())
}
