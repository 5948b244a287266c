// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

/// Network state PDA seed (singleton)
pub const NETWORK_STATE_SEED: &[u8] = b"network_v1";

/// Vault authority PDA seed (signs every payout from the vault)
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_auth_v1";

/// Vault token account PDA seed
pub const VAULT_SEED: &[u8] = b"vault_v1";

/// Operator PDA seed: ["operator_v1", operator_id (u64 LE)]
pub const OPERATOR_SEED: &[u8] = b"operator_v1";

/// Pending fee change PDA seed: ["fee_request_v1", operator_id (u64 LE)]
pub const FEE_REQUEST_SEED: &[u8] = b"fee_request_v1";

/// Cluster PDA seed: ["cluster_v1", owner, cluster_key]
pub const CLUSTER_SEED: &[u8] = b"cluster_v1";

/// Validator PDA seed: ["validator_v1", sha256(public_key)]
pub const VALIDATOR_SEED: &[u8] = b"validator_v1";

// ══════════════════════════════════════════════════════════════════════════════
// CLUSTER SHAPE
// ══════════════════════════════════════════════════════════════════════════════

/// Committee sizes a cluster may have (3f + 1 for f = 1..=4)
pub const SUPPORTED_CLUSTER_SIZES: [usize; 4] = [4, 7, 10, 13];

/// Largest supported committee, used for account sizing
pub const MAX_CLUSTER_SIZE: usize = 13;

/// Maximum validators per bulk instruction (bounded by transaction account limits)
pub const MAX_VALIDATORS_PER_BATCH: usize = 16;

/// BLS12-381 compressed public key length
pub const VALIDATOR_PUBLIC_KEY_LEN: usize = 48;

// ══════════════════════════════════════════════════════════════════════════════
// FEE PRECISION
// ══════════════════════════════════════════════════════════════════════════════

/// Fees (operator and network) must be a multiple of this many base units
pub const FEE_GRANULARITY: u64 = 10_000;

/// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Payment token decimals, used only to format logs
pub const TOKEN_DECIMALS: u32 = 9;

// ══════════════════════════════════════════════════════════════════════════════
// DEFAULT PARAMETERS (slots are ~400ms)
// ══════════════════════════════════════════════════════════════════════════════

/// Smallest non-zero operator fee per validator per slot
pub const DEFAULT_MINIMAL_OPERATOR_FEE: u64 = 100_000;

/// Largest operator fee per validator per slot
pub const DEFAULT_OPERATOR_MAX_FEE: u64 = 1_000_000_000;

/// Maximum fee increase per declaration (10%)
pub const DEFAULT_OPERATOR_FEE_INCREASE_LIMIT_BPS: u64 = 1_000;

/// Delay between declaring and executing a fee change (~3 days)
pub const DEFAULT_DECLARE_OPERATOR_FEE_PERIOD: u64 = 648_000;

/// Length of the execution window once the delay has elapsed (~1 day)
pub const DEFAULT_EXECUTE_OPERATOR_FEE_PERIOD: u64 = 216_000;

/// Runway a cluster must keep funded to stay active (~7 days)
pub const DEFAULT_MINIMUM_BLOCKS_BEFORE_LIQUIDATION: u64 = 1_512_000;

/// Absolute balance floor below which a cluster is liquidatable (1 token)
pub const DEFAULT_MINIMUM_LIQUIDATION_COLLATERAL: u64 = 1_000_000_000;

/// Maximum validators a single operator may serve
pub const DEFAULT_VALIDATORS_PER_OPERATOR_LIMIT: u32 = 500;

// ══════════════════════════════════════════════════════════════════════════════
// TESTING MODE CONFIGURATION
// ══════════════════════════════════════════════════════════════════════════════
// SECURITY: Use feature flag instead of runtime constant
// Build with: anchor build -- --features testing (for devnet)
//
// When true (TESTING):
//   - Liquidation runway may be set as low as 10 slots
// When false (PRODUCTION):
//   - Liquidation runway must be at least ~1 day
#[cfg(feature = "testing")]
pub const MINIMAL_BLOCKS_BEFORE_LIQUIDATION: u64 = 10;
#[cfg(not(feature = "testing"))]
pub const MINIMAL_BLOCKS_BEFORE_LIQUIDATION: u64 = 216_000;
