use crate::util::{elapsed_fraction, format_clock, minutes_to_secs};

pub const DEFAULT_SESSION_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// In-memory countdown state. Mutated only through `SessionTimer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    total_seconds: u64,
    remaining_seconds: u64,
    running: bool,
}

impl Session {
    /// A fresh idle session. A zero length is bumped to one second.
    pub fn new(total_seconds: u64) -> Self {
        let total_seconds = total_seconds.max(1);
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(minutes_to_secs(minutes))
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        match (self.remaining_seconds, self.running) {
            (0, _) => Phase::Completed,
            (_, true) => Phase::Running,
            (_, false) => Phase::Idle,
        }
    }

    /// True when nothing has elapsed and the clock is stopped
    pub fn is_pristine(&self) -> bool {
        !self.running && self.remaining_seconds == self.total_seconds
    }

    /// Elapsed share of the session in [0, 1]
    pub fn progress(&self) -> f64 {
        elapsed_fraction(self.total_seconds, self.remaining_seconds)
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        // completion forces pause
        self.running = running && self.remaining_seconds > 0;
    }

    pub(crate) fn rewind(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.running = false;
    }

    pub(crate) fn resize(&mut self, total_seconds: u64) {
        self.total_seconds = total_seconds.max(1);
        self.rewind();
    }

    /// Take one second off the clock. Returns true when this reached zero.
    pub(crate) fn count_down(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            return true;
        }
        false
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_SESSION_MINUTES)
    }
}
