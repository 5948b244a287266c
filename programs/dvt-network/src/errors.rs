use anchor_lang::prelude::*;

/// DVT Network Error Codes
///
/// Every rejected operation maps to exactly one variant so that indexers and
/// liquidation bots can tell "not yet eligible" apart from "already
/// liquidated" or "insufficient funds".
#[error_code]
pub enum ErrorCode {
    // Authorization
    #[msg("Unauthorized")]
    UnauthorizedAccess,

    #[msg("Caller is not the owner")]
    CallerNotOwner,

    #[msg("Caller is not whitelisted for this operator")]
    CallerNotWhitelisted,

    #[msg("No pending authority transfer")]
    NoPendingAuthorityTransfer,

    // Operator / fee change state
    #[msg("Operator does not exist")]
    OperatorDoesNotExist,

    #[msg("Operator account does not match operator id")]
    OperatorAccountMismatch,

    #[msg("No fee change declared")]
    NoFeeDeclared,

    #[msg("A fee change is already pending")]
    FeeChangeAlreadyPending,

    #[msg("Fee change approval is not within timeframe")]
    ApprovalNotWithinTimeframe,

    // Fee bounds
    #[msg("Fee is below the minimum operator fee")]
    FeeTooLow,

    #[msg("Fee is above the maximum operator fee")]
    FeeTooHigh,

    #[msg("Fee increase exceeds the allowed limit")]
    FeeExceedsIncreaseLimit,

    #[msg("Fee increase not allowed")]
    FeeIncreaseNotAllowed,

    #[msg("New fee equals the current fee")]
    SameFeeChangeNotAllowed,

    #[msg("Fee precision exceeds the supported granularity")]
    MaxPrecisionExceeded,

    // Cluster shape
    #[msg("Operator ids must be strictly increasing")]
    UnsortedOperatorIds,

    #[msg("Unsupported number of operators")]
    InvalidOperatorIdsLength,

    #[msg("Cluster key does not match operator ids")]
    IncorrectClusterState,

    // Cluster state
    #[msg("Cluster is liquidated")]
    ClusterIsLiquidated,

    #[msg("Cluster is already active")]
    ClusterAlreadyEnabled,

    #[msg("Cluster is not liquidatable")]
    ClusterNotLiquidatable,

    #[msg("Operator validator limit exceeded")]
    ExceedValidatorLimit,

    // Validators
    #[msg("Invalid validator public key length")]
    InvalidPublicKeyLength,

    #[msg("Validator already exists")]
    ValidatorAlreadyExists,

    #[msg("Validator does not exist")]
    ValidatorDoesNotExist,

    #[msg("Validator already exited")]
    ValidatorAlreadyExited,

    #[msg("Validator account does not match public key")]
    ValidatorAccountMismatch,

    #[msg("Validator batch is empty or too large")]
    InvalidValidatorBatch,

    // Economics
    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Amount must be positive")]
    InvalidAmount,

    #[msg("Token account mint does not match the payment token")]
    MintMismatch,

    // Parameters
    #[msg("Invalid parameter")]
    InvalidParameter,

    #[msg("Liquidation period is below the minimum")]
    LiquidationPeriodTooShort,

    // Arithmetic
    #[msg("Math overflow")]
    MathOverflow,
}
