use anchor_lang::prelude::*;

/// Current position in the network's linear time unit (the slot)
///
/// Every accrual formula is expressed in slots; no other clock is read.
pub fn current_block() -> Result<u64> {
    Ok(Clock::get()?.slot)
}
