use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

pub fn checked_add(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_add(b).ok_or(ErrorCode::MathOverflow)?)
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_sub(b).ok_or(ErrorCode::MathOverflow)?)
}

/// Amount accrued at `rate` per slot over `blocks` slots
///
/// Widened to u128 so the product itself cannot wrap; a result that does
/// not fit back into u64 aborts the transition.
pub fn accrue(rate: u64, blocks: u64) -> Result<u64> {
    let product = (rate as u128)
        .checked_mul(blocks as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(u64::try_from(product).map_err(|_| ErrorCode::MathOverflow)?)
}

/// Per-validator amount multiplied by a validator count
pub fn scale_by_validators(per_validator: u64, validator_count: u32) -> Result<u64> {
    accrue(per_validator, validator_count as u64)
}

/// Rejects fees finer than FEE_GRANULARITY instead of rounding them
pub fn validate_fee_precision(fee: u64) -> Result<()> {
    require!(fee % FEE_GRANULARITY == 0, ErrorCode::MaxPrecisionExceeded);
    Ok(())
}

/// Highest fee reachable from `current_fee` in one declaration
/// Formula: current_fee * (10000 + increase_limit_bps) / 10000
pub fn max_allowed_fee(current_fee: u64, increase_limit_bps: u64) -> Result<u64> {
    let multiplier = (BPS_DENOMINATOR as u128)
        .checked_add(increase_limit_bps as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    let scaled = (current_fee as u128)
        .checked_mul(multiplier)
        .ok_or(ErrorCode::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    Ok(u64::try_from(scaled).map_err(|_| ErrorCode::MathOverflow)?)
}

/// Balance a cluster must hold to cover `minimum_blocks` slots at `burn_rate`
///
/// Kept in u128: a threshold past u64::MAX is unreachable by any balance,
/// which makes the cluster liquidatable rather than an overflow.
pub fn liquidation_threshold(burn_rate: u64, minimum_blocks: u64) -> u128 {
    burn_rate as u128 * minimum_blocks as u128
}

/// Lamports still needed for rent exemption on a pre-funded account
pub fn rent_top_up(minimum_balance: u64, current_lamports: u64) -> u64 {
    minimum_balance.max(1).saturating_sub(current_lamports)
}

/// Format token amount with decimals for readable logs
pub fn format_tokens(amount: u64) -> (u64, u64) {
    let unit = 10u64.pow(TOKEN_DECIMALS);
    (amount / unit, amount % unit)
}
