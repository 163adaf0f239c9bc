use crate::state::{DistributionConfig, DropState};

/**
 * Everything a handler needs to run one operation
 *
 * Built by the engine while it holds the write lock, so `state` is the only
 * writer for the duration of the handler.
 */
pub struct DropContext<'a, G: ?Sized, L: ?Sized> {
    pub config: &'a DistributionConfig,
    pub guard: &'a G,
    pub ledger: &'a L,
    pub state: &'a mut DropState,
}
