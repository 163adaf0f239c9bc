use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{MerkleDropError, Result};

/// Source of the current Unix timestamp in seconds.
pub trait ClockSource: Send + Sync {
    fn unix_timestamp(&self) -> Result<i64>;
}

impl<T: ClockSource + ?Sized> ClockSource for Arc<T> {
    fn unix_timestamp(&self) -> Result<i64> {
        (**self).unix_timestamp()
    }
}

/// Wall clock of the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn unix_timestamp(&self) -> Result<i64> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| MerkleDropError::ClockUnavailable(e.to_string()))?;
        i64::try_from(elapsed.as_secs()).map_err(|_| MerkleDropError::ArithmeticOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.unix_timestamp().unwrap() > 1_577_836_800);
    }
}
