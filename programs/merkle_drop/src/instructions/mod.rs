pub mod add_period;
pub mod claim;
pub mod claim_all;
pub mod context;
pub mod recover;

pub use add_period::*;
pub use claim::*;
pub use claim_all::*;
pub use context::*;
pub use recover::*;
