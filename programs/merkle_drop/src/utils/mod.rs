pub mod hash;
pub mod merkle_proof;
pub mod payout;

pub use hash::*;
pub use merkle_proof::*;
pub use payout::*;
