//! Lazy checkpoint accounting
//!
//! Pure state transitions over the account structs. Handlers load accounts,
//! read the slot and call into here; nothing in this module touches the
//! runtime, so it runs unchanged under `cargo test`.

pub mod clusters;
pub mod fee_change;
pub mod liquidation;
pub mod operators;
pub mod treasury;

pub use clusters::*;
pub use fee_change::*;
pub use liquidation::*;
pub use operators::*;
pub use treasury::*;
