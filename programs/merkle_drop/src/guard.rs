use anchor_lang::prelude::Pubkey;

/// Capability check consulted before adding a period or recovering funds.
pub trait ControllerGuard: Send + Sync {
    fn is_controller(&self, identity: &Pubkey) -> bool;
}

/// Grants control to exactly one identity, normally the configured controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleController(pub Pubkey);

impl ControllerGuard for SingleController {
    fn is_controller(&self, identity: &Pubkey) -> bool {
        *identity == self.0
    }
}

impl<F> ControllerGuard for F
where
    F: Fn(&Pubkey) -> bool + Send + Sync,
{
    fn is_controller(&self, identity: &Pubkey) -> bool {
        self(identity)
    }
}
