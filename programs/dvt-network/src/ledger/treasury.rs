use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::helpers::math::*;
use crate::state::NetworkState;

/// The network fee is accounted exactly like an operator whose validator
/// count is every active validator on the network.
impl NetworkState {
    pub fn current_network_fee_index(&self, block: u64) -> Result<u64> {
        self.network_fee_snapshot.index_at(self.network_fee, block)
    }

    /// Lifetime treasury earnings at `block`, withdrawn amounts included
    pub fn treasury_earnings_at(&self, block: u64) -> Result<u64> {
        let delta = checked_sub(self.current_network_fee_index(block)?, self.treasury_index)?;
        checked_add(
            self.treasury_earnings,
            scale_by_validators(delta, self.active_validator_count)?,
        )
    }

    /// Amount the authority can still withdraw at `block`
    pub fn treasury_balance(&self, block: u64) -> Result<u64> {
        checked_sub(self.treasury_earnings_at(block)?, self.treasury_withdrawn)
    }

    pub fn checkpoint_treasury(&mut self, block: u64) -> Result<()> {
        self.treasury_earnings = self.treasury_earnings_at(block)?;
        self.treasury_index = self.current_network_fee_index(block)?;
        Ok(())
    }

    pub fn update_network_fee(&mut self, fee: u64, block: u64) -> Result<()> {
        validate_fee_precision(fee)?;
        self.checkpoint_treasury(block)?;
        self.network_fee_snapshot.advance(self.network_fee, block)?;
        self.network_fee = fee;

        #[cfg(feature = "verbose")]
        msg!("Network fee index {} at slot {}", self.network_fee_snapshot.index, block);

        Ok(())
    }

    pub fn add_validators(&mut self, count: u32, block: u64) -> Result<()> {
        self.checkpoint_treasury(block)?;
        self.active_validator_count = self
            .active_validator_count
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn remove_validators(&mut self, count: u32, block: u64) -> Result<()> {
        self.checkpoint_treasury(block)?;
        self.active_validator_count = self
            .active_validator_count
            .checked_sub(count)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn withdraw_treasury(&mut self, amount: u64, block: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(
            amount <= self.treasury_balance(block)?,
            ErrorCode::InsufficientBalance
        );
        self.treasury_withdrawn = checked_add(self.treasury_withdrawn, amount)?;
        Ok(())
    }
}
