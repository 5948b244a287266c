pub mod remaining_accounts;
pub mod clock;
pub mod cpi;
pub mod ids;
pub mod math;

pub use remaining_accounts::*;
pub use clock::*;
pub use cpi::*;
pub use ids::*;
pub use math::*;
