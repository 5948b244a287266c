pub mod cluster;
pub mod fee_request;
pub mod network_state;
pub mod operator;
pub mod snapshot;
pub mod validator;

pub use cluster::*;
pub use fee_request::*;
pub use network_state::*;
pub use operator::*;
pub use snapshot::*;
pub use validator::*;
