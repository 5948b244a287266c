use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use super::FeeSnapshot;

/// Governance parameters
///
/// Changes apply to future accrual only; nothing already accrued is
/// recomputed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Smallest non-zero operator fee
    pub minimal_operator_fee: u64,

    /// Largest operator fee
    pub operator_max_fee: u64,

    /// Maximum increase per fee declaration, in basis points of the current fee
    pub operator_fee_increase_limit_bps: u64,

    /// Slots between declaring and the start of the execution window
    pub declare_operator_fee_period: u64,

    /// Length of the execution window in slots
    pub execute_operator_fee_period: u64,

    /// Runway (in slots of burn) a cluster must keep funded
    pub minimum_blocks_before_liquidation: u64,

    /// Balance floor below which a cluster is liquidatable
    pub minimum_liquidation_collateral: u64,

    /// Maximum validators per operator
    pub validators_per_operator_limit: u32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            minimal_operator_fee: DEFAULT_MINIMAL_OPERATOR_FEE,
            operator_max_fee: DEFAULT_OPERATOR_MAX_FEE,
            operator_fee_increase_limit_bps: DEFAULT_OPERATOR_FEE_INCREASE_LIMIT_BPS,
            declare_operator_fee_period: DEFAULT_DECLARE_OPERATOR_FEE_PERIOD,
            execute_operator_fee_period: DEFAULT_EXECUTE_OPERATOR_FEE_PERIOD,
            minimum_blocks_before_liquidation: DEFAULT_MINIMUM_BLOCKS_BEFORE_LIQUIDATION,
            minimum_liquidation_collateral: DEFAULT_MINIMUM_LIQUIDATION_COLLATERAL,
            validators_per_operator_limit: DEFAULT_VALIDATORS_PER_OPERATOR_LIMIT,
        }
    }
}

impl NetworkParams {
    /// 7 u64 + 1 u32 = 60 bytes
    pub const LEN: usize = 8 * 7 + 4;

    pub fn validate(&self) -> Result<()> {
        require!(
            self.minimum_blocks_before_liquidation >= MINIMAL_BLOCKS_BEFORE_LIQUIDATION,
            ErrorCode::LiquidationPeriodTooShort
        );
        require!(self.validators_per_operator_limit > 0, ErrorCode::InvalidParameter);
        require!(self.execute_operator_fee_period > 0, ErrorCode::InvalidParameter);
        require!(
            self.operator_fee_increase_limit_bps <= BPS_DENOMINATOR,
            ErrorCode::InvalidParameter
        );
        require!(
            self.minimal_operator_fee % FEE_GRANULARITY == 0
                && self.operator_max_fee % FEE_GRANULARITY == 0,
            ErrorCode::MaxPrecisionExceeded
        );
        require!(
            self.minimal_operator_fee <= self.operator_max_fee,
            ErrorCode::InvalidParameter
        );
        Ok(())
    }

    /// Returns the parameters with `update` applied, validated as a whole
    pub fn apply(&self, update: &ParameterUpdate) -> Result<NetworkParams> {
        let mut next = *self;
        if let Some(v) = update.minimal_operator_fee { next.minimal_operator_fee = v; }
        if let Some(v) = update.operator_max_fee { next.operator_max_fee = v; }
        if let Some(v) = update.operator_fee_increase_limit_bps { next.operator_fee_increase_limit_bps = v; }
        if let Some(v) = update.declare_operator_fee_period { next.declare_operator_fee_period = v; }
        if let Some(v) = update.execute_operator_fee_period { next.execute_operator_fee_period = v; }
        if let Some(v) = update.minimum_blocks_before_liquidation { next.minimum_blocks_before_liquidation = v; }
        if let Some(v) = update.minimum_liquidation_collateral { next.minimum_liquidation_collateral = v; }
        if let Some(v) = update.validators_per_operator_limit { next.validators_per_operator_limit = v; }
        next.validate()?;
        Ok(next)
    }
}

/// Partial parameter update; `None` leaves a value unchanged
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParameterUpdate {
    pub minimal_operator_fee: Option<u64>,
    pub operator_max_fee: Option<u64>,
    pub operator_fee_increase_limit_bps: Option<u64>,
    pub declare_operator_fee_period: Option<u64>,
    pub execute_operator_fee_period: Option<u64>,
    pub minimum_blocks_before_liquidation: Option<u64>,
    pub minimum_liquidation_collateral: Option<u64>,
    pub validators_per_operator_limit: Option<u32>,
}

/// Global network configuration, network fee and treasury
///
/// Only one NetworkState account exists per program instance.
///
/// PDA Seeds: ["network_v1"]
#[account]
pub struct NetworkState {
    /// Governance authority (DAO)
    pub authority: Pubkey,

    /// Two-step authority transfer: proposed new authority
    pub pending_authority: Option<Pubkey>,

    /// Payment token mint
    pub token_mint: Pubkey,

    /// Vault token account holding every deposit
    pub vault: Pubkey,

    /// PDA bump for the vault authority
    pub vault_authority_bump: u8,

    /// PDA bump for this account
    pub bump: u8,

    /// Highest operator id assigned so far
    pub last_operator_id: u64,

    /// Network fee per validator per slot
    pub network_fee: u64,

    /// Network fee index checkpoint
    pub network_fee_snapshot: FeeSnapshot,

    /// Active validators across all active clusters
    pub active_validator_count: u32,

    /// Treasury earnings realized as of `treasury_index`
    pub treasury_earnings: u64,

    /// Network fee index at the last treasury checkpoint
    pub treasury_index: u64,

    /// Cumulative amount withdrawn by the authority
    pub treasury_withdrawn: u64,

    /// Governance parameters
    pub params: NetworkParams,

    /// Slot at which the network was initialized
    pub initialized_at_block: u64,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl NetworkState {
    /// Account size calculation:
    /// - authority: 32, pending_authority: 33, token_mint: 32, vault: 32
    /// - bumps: 2, last_operator_id: 8, network_fee: 8
    /// - network_fee_snapshot: 16, active_validator_count: 4
    /// - treasury_earnings / treasury_index / treasury_withdrawn: 24
    /// - params: 60, initialized_at_block: 8, _reserved: 32
    /// Total: 291 bytes
    pub const LEN: usize = 32 + 33 + 32 + 32 + 1 + 1 + 8 + 8 + FeeSnapshot::LEN + 4
        + 8 * 3 + NetworkParams::LEN + 8 + 32;

    pub fn new(
        authority: Pubkey,
        token_mint: Pubkey,
        vault: Pubkey,
        network_fee: u64,
        params: NetworkParams,
        block: u64,
    ) -> Self {
        Self {
            authority,
            pending_authority: None,
            token_mint,
            vault,
            vault_authority_bump: 0,
            bump: 0,
            last_operator_id: 0,
            network_fee,
            network_fee_snapshot: FeeSnapshot::new(block),
            active_validator_count: 0,
            treasury_earnings: 0,
            treasury_index: 0,
            treasury_withdrawn: 0,
            params,
            initialized_at_block: block,
            _reserved: [0u8; 32],
        }
    }

    /// Reserves the next operator id
    pub fn next_operator_id(&mut self) -> Result<u64> {
        let id = self.last_operator_id.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        self.last_operator_id = id;
        Ok(id)
    }
}
