//! Reception eligibility.

use crate::MessageState;

/// Decides whether a station accepts a transmitted copy as a new
/// acquisition (otherwise the copy is a duplicate).
pub trait ReceptionRule {
    fn can_receive(&self, state: &MessageState) -> bool;

    /// Lifetime given to a station that acquires the message.
    fn acquired_lifetime(&self) -> Option<u32> {
        None
    }
}

/// Plain flooding: the first copy is the only acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstCopy;

impl ReceptionRule for FirstCopy {
    fn can_receive(&self, state: &MessageState) -> bool {
        !state.has_message()
    }
}

/// Messages expire `ttl` rounds after acquisition.  Reception is blocked
/// strictly while a lifetime is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToLive {
    pub ttl: u32,
}

impl ReceptionRule for TimeToLive {
    fn can_receive(&self, state: &MessageState) -> bool {
        !state.has_message() && !state.lifetime_active()
    }

    fn acquired_lifetime(&self) -> Option<u32> {
        Some(self.ttl)
    }
}

impl<R: ReceptionRule + ?Sized> ReceptionRule for &R {
    fn can_receive(&self, state: &MessageState) -> bool {
        (**self).can_receive(state)
    }

    fn acquired_lifetime(&self) -> Option<u32> {
        (**self).acquired_lifetime()
    }
}
