use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::helpers::math::*;
use crate::state::{NetworkParams, Operator};

/// Checks a fee against the governance bounds
///
/// Zero is accepted (free operator); any other value must sit between the
/// minimal and maximum operator fee and respect FEE_GRANULARITY.
pub fn validate_operator_fee(fee: u64, params: &NetworkParams) -> Result<()> {
    validate_fee_precision(fee)?;
    require!(
        fee == 0 || fee >= params.minimal_operator_fee,
        ErrorCode::FeeTooLow
    );
    require!(fee <= params.operator_max_fee, ErrorCode::FeeTooHigh);
    Ok(())
}

impl Operator {
    /// Validated constructor used by `register_operator`
    pub fn register(
        id: u64,
        owner: Pubkey,
        fee: u64,
        params: &NetworkParams,
        block: u64,
        bump: u8,
    ) -> Result<Self> {
        validate_operator_fee(fee, params)?;
        Ok(Self::new(id, owner, fee, block, bump))
    }

    /// Per-validator earnings index at `block`; frozen once removed
    pub fn current_index(&self, block: u64) -> Result<u64> {
        if !self.active {
            return Ok(self.snapshot.index);
        }
        self.snapshot.index_at(self.fee, block)
    }

    /// Withdrawable earnings at `block` without writing anything
    pub fn earnings_at(&self, block: u64) -> Result<u64> {
        let delta = checked_sub(self.current_index(block)?, self.snapshot.index)?;
        checked_add(self.balance, scale_by_validators(delta, self.validator_count)?)
    }

    /// Realizes accrued earnings into `balance` and moves the snapshot to `block`
    ///
    /// Calling it twice at the same slot changes nothing the second time.
    pub fn checkpoint(&mut self, block: u64) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        let delta = self.snapshot.advance(self.fee, block)?;
        self.balance = checked_add(self.balance, scale_by_validators(delta, self.validator_count)?)?;

        #[cfg(feature = "verbose")]
        msg!("Operator {} checkpoint: index={} balance={}", self.id, self.snapshot.index, self.balance);

        Ok(())
    }

    pub fn add_validators(&mut self, count: u32, limit: u32, block: u64) -> Result<()> {
        require!(self.active, ErrorCode::OperatorDoesNotExist);
        self.checkpoint(block)?;
        let next = self
            .validator_count
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(next <= limit, ErrorCode::ExceedValidatorLimit);
        self.validator_count = next;
        Ok(())
    }

    /// Removed operators already dropped their count, so they are skipped
    pub fn remove_validators(&mut self, count: u32, block: u64) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.checkpoint(block)?;
        self.validator_count = self
            .validator_count
            .checked_sub(count)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Checkpoints at the old fee, then switches to `fee`
    pub fn set_fee(&mut self, fee: u64, block: u64) -> Result<()> {
        self.checkpoint(block)?;
        self.fee = fee;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64, block: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.checkpoint(block)?;
        require!(self.balance >= amount, ErrorCode::InsufficientBalance);
        self.balance = checked_sub(self.balance, amount)?;
        Ok(())
    }

    /// Drains the realized balance and returns it
    pub fn withdraw_all(&mut self, block: u64) -> Result<u64> {
        self.checkpoint(block)?;
        let amount = self.balance;
        require!(amount > 0, ErrorCode::InsufficientBalance);
        self.balance = 0;
        Ok(amount)
    }

    /// Soft-deletes the operator and returns the earnings owed to its owner
    ///
    /// The index stays frozen at its final value so clusters that still
    /// reference the operator stop burning for it.
    pub fn remove(&mut self, block: u64) -> Result<u64> {
        require!(self.active, ErrorCode::OperatorDoesNotExist);
        self.checkpoint(block)?;
        let payout = self.balance;
        self.balance = 0;
        self.fee = 0;
        self.validator_count = 0;
        self.active = false;
        Ok(payout)
    }

    pub fn is_authorized(&self, caller: &Pubkey) -> bool {
        !self.is_private() || self.whitelisted == *caller
    }

    /// `Pubkey::default()` makes the operator public again
    pub fn set_whitelist(&mut self, address: Pubkey) -> Result<()> {
        require!(self.active, ErrorCode::OperatorDoesNotExist);
        self.whitelisted = address;
        Ok(())
    }
}
