pub mod config;
pub mod drop_state;
pub mod period;
pub mod period_store;

pub use config::*;
pub use drop_state::*;
pub use period::*;
pub use period_store::*;
