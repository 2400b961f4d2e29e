//! Trigger cancellation
//!
//! The render tick and the spawn timer are two independent periodic
//! callbacks. Both capture the [`TriggerToken`] handed out when a session
//! starts; closing the schedule invalidates every outstanding token, so a
//! callback that was already queued when the session ended becomes a no-op.

/// Handle captured by a periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerToken {
    generation: u64,
}

impl TriggerToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generation counter shared by all triggers of a session
#[derive(Debug, Clone, Default)]
pub struct TriggerSchedule {
    generation: u64,
    open: bool,
}

impl TriggerSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; tokens from earlier generations are stale
    pub fn open(&mut self) -> TriggerToken {
        self.generation += 1;
        self.open = true;
        TriggerToken {
            generation: self.generation,
        }
    }

    /// Invalidate every outstanding token
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_live(&self, token: TriggerToken) -> bool {
        self.open && token.generation == self.generation
    }
}
