use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::helpers::math::*;
use crate::state::{NetworkParams, Operator, OperatorFeeRequest};
use super::operators::validate_operator_fee;

impl OperatorFeeRequest {
    /// A request blocks new declarations until its window has closed
    pub fn is_pending(&self, block: u64) -> bool {
        self.approval_end_block != 0 && block <= self.approval_end_block
    }

    /// Both bounds inclusive
    pub fn is_within_window(&self, block: u64) -> bool {
        self.approval_begin_block <= block && block <= self.approval_end_block
    }
}

/// Phase one: records `fee` with an execution window opening after the
/// declare period. An expired request is simply overwritten.
pub fn declare_operator_fee(
    operator: &Operator,
    request: &mut OperatorFeeRequest,
    fee: u64,
    params: &NetworkParams,
    block: u64,
) -> Result<()> {
    require!(operator.active, ErrorCode::OperatorDoesNotExist);
    require!(!request.is_pending(block), ErrorCode::FeeChangeAlreadyPending);
    validate_operator_fee(fee, params)?;
    require!(fee != operator.fee, ErrorCode::SameFeeChangeNotAllowed);
    require!(operator.fee != 0, ErrorCode::FeeIncreaseNotAllowed);
    require!(
        fee <= max_allowed_fee(operator.fee, params.operator_fee_increase_limit_bps)?,
        ErrorCode::FeeExceedsIncreaseLimit
    );

    let approval_begin_block = checked_add(block, params.declare_operator_fee_period)?;
    let approval_end_block = checked_add(approval_begin_block, params.execute_operator_fee_period)?;

    request.operator_id = operator.id;
    request.fee = fee;
    request.approval_begin_block = approval_begin_block;
    request.approval_end_block = approval_end_block;

    #[cfg(feature = "verbose")]
    msg!("Fee request {}: window [{}, {}]", operator.id, approval_begin_block, approval_end_block);

    Ok(())
}

/// Phase two: commits the declared fee inside its window
pub fn execute_operator_fee(
    operator: &mut Operator,
    request: &OperatorFeeRequest,
    params: &NetworkParams,
    block: u64,
) -> Result<()> {
    require!(operator.active, ErrorCode::OperatorDoesNotExist);
    require!(request.approval_end_block != 0, ErrorCode::NoFeeDeclared);
    require!(request.is_within_window(block), ErrorCode::ApprovalNotWithinTimeframe);
    // The cap may have been lowered since the declaration
    require!(request.fee <= params.operator_max_fee, ErrorCode::FeeTooHigh);

    operator.set_fee(request.fee, block)
}

pub fn cancel_declared_operator_fee(operator: &Operator, request: &OperatorFeeRequest) -> Result<()> {
    require!(operator.active, ErrorCode::OperatorDoesNotExist);
    require!(request.approval_end_block != 0, ErrorCode::NoFeeDeclared);
    Ok(())
}

/// Immediate decrease, no window. A pending request is left as is.
pub fn reduce_operator_fee(
    operator: &mut Operator,
    fee: u64,
    params: &NetworkParams,
    block: u64,
) -> Result<()> {
    require!(operator.active, ErrorCode::OperatorDoesNotExist);
    validate_fee_precision(fee)?;
    require!(fee < operator.fee, ErrorCode::FeeIncreaseNotAllowed);
    require!(
        fee == 0 || fee >= params.minimal_operator_fee,
        ErrorCode::FeeTooLow
    );

    operator.set_fee(fee, block)
}
