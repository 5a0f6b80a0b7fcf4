//! Per-station message record.

/// Where a station is in the flooding state machine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BroadcastPhase {
    /// Does not hold the message.
    #[default]
    NoMessage,
    /// Holds the message and will transmit it next round.
    Pending,
    /// Holds the message and has already transmitted it.
    Transmitted,
}

/// Message-related state of one station.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageState {
    pub phase: BroadcastPhase,

    /// Copies received: 1 on acquisition, +1 per duplicate.  The source
    /// starts at 0.
    pub reception_count: u32,

    /// Rounds left before the message expires.  `None` outside the TTL
    /// scenario and while no message is held.
    pub lifetime: Option<u32>,

    /// `true` for the station the broadcast started from.
    pub is_source: bool,

    /// `true` once a held message expired.  Reset on re-acquisition.
    pub expired: bool,
}

impl MessageState {
    #[inline]
    pub fn has_message(&self) -> bool {
        self.phase != BroadcastPhase::NoMessage
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.phase == BroadcastPhase::Pending
    }

    /// `true` while a TTL countdown is running.
    #[inline]
    pub fn lifetime_active(&self) -> bool {
        self.lifetime.is_some_and(|l| l > 0)
    }

    /// Take the message: pending, one reception, fresh lifetime.
    pub fn acquire(&mut self, lifetime: Option<u32>) {
        self.phase           = BroadcastPhase::Pending;
        self.reception_count = 1;
        self.lifetime        = lifetime;
        self.expired         = false;
    }

    /// Drop the message after its lifetime ran out.
    pub fn expire(&mut self) {
        self.phase           = BroadcastPhase::NoMessage;
        self.reception_count = 0;
        self.lifetime        = None;
        self.expired         = true;
    }
}
