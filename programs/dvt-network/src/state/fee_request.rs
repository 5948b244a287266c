use anchor_lang::prelude::*;

/// Pending operator fee change
///
/// Exists only between declare and execute/cancel; the account is closed
/// afterwards so its absence means "no pending request".
///
/// PDA Seeds: ["fee_request_v1", operator_id (u64 LE)]
#[account]
pub struct OperatorFeeRequest {
    /// Operator this request belongs to
    pub operator_id: u64,

    /// Declared fee per validator per slot
    pub fee: u64,

    /// First slot at which the fee may be executed
    pub approval_begin_block: u64,

    /// Last slot at which the fee may be executed
    pub approval_end_block: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl OperatorFeeRequest {
    /// Account size: 8 + 8 + 8 + 8 + 1 = 33 bytes
    pub const LEN: usize = 8 + 8 + 8 + 8 + 1;
}

/// Return data of `get_operator_declared_fee`
///
/// `pending` is false once the execution window has closed; the request
/// then only lingers until it is overwritten or closed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeclaredOperatorFee {
    pub pending: bool,
    pub fee: u64,
    pub approval_begin_block: u64,
    pub approval_end_block: u64,
}

impl DeclaredOperatorFee {
    pub fn at(request: &OperatorFeeRequest, block: u64) -> Self {
        Self {
            pending: request.is_pending(block),
            fee: request.fee,
            approval_begin_block: request.approval_begin_block,
            approval_end_block: request.approval_end_block,
        }
    }
}
