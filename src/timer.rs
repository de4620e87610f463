//! The countdown state machine.
//!
//! `SessionTimer` owns a [`Session`] and the [`TickSource`] that drives it.
//! Every transition out of `Running` cancels the source and advances the
//! generation counter, so ticks that were already queued before the stop
//! arrive with a stale stamp and are dropped without touching the session.

use chrono::{DateTime, Duration as ChronoDuration, Local};

use crate::session::{Phase, Session, DEFAULT_SESSION_MINUTES};
use crate::tick::{TickSource, TickStamp};
use crate::util::minutes_to_secs;

/// Result of a start/pause request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Paused,
    /// The session is complete; only reset or reconfigure leave that state.
    Ignored,
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counted,
    Completed,
    /// Wrong generation, or the timer is not running. Nothing changed.
    Stale,
}

#[derive(Debug)]
pub struct SessionTimer<T: TickSource> {
    session: Session,
    ticks: T,
    generation: u64,
}

impl<T: TickSource> SessionTimer<T> {
    pub fn new(ticks: T) -> Self {
        Self::with_minutes(DEFAULT_SESSION_MINUTES, ticks)
    }

    pub fn with_minutes(minutes: u32, ticks: T) -> Self {
        Self {
            session: Session::from_minutes(clamp_minutes(minutes)),
            ticks,
            generation: 0,
        }
    }

    pub fn toggle(&mut self) -> Toggle {
        match self.session.phase() {
            Phase::Completed => {
                log::debug!("toggle ignored: session already complete");
                Toggle::Ignored
            }
            Phase::Running => {
                self.stop_ticks();
                self.session.set_running(false);
                log::info!("paused with {}s left", self.session.remaining_seconds());
                Toggle::Paused
            }
            Phase::Idle => {
                self.session.set_running(true);
                self.ticks.start(TickStamp(self.generation));
                log::info!("started with {}s left", self.session.remaining_seconds());
                Toggle::Started
            }
        }
    }

    pub fn reset(&mut self) {
        self.stop_ticks();
        self.session.rewind();
        log::debug!("reset to {}s", self.session.total_seconds());
    }

    /// Replace the session length and rewind. Zero minutes is clamped to one.
    pub fn reconfigure(&mut self, minutes: u32) {
        let minutes = clamp_minutes(minutes);
        self.stop_ticks();
        self.session.resize(minutes_to_secs(minutes));
        log::info!("session length set to {minutes} minutes");
    }

    pub fn tick(&mut self, stamp: TickStamp) -> TickOutcome {
        if stamp.0 != self.generation || !self.session.is_running() {
            log::trace!(
                "dropping stale tick (stamp {}, generation {})",
                stamp.0,
                self.generation
            );
            return TickOutcome::Stale;
        }

        if self.session.count_down() {
            self.stop_ticks();
            log::info!("session complete");
            TickOutcome::Completed
        } else {
            TickOutcome::Counted
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.session.remaining_seconds()
    }

    pub fn total_seconds(&self) -> u64 {
        self.session.total_seconds()
    }

    /// Configured length in whole minutes
    pub fn total_minutes(&self) -> u32 {
        u32::try_from(self.session.total_seconds() / 60).unwrap_or(u32::MAX)
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn progress(&self) -> f64 {
        self.session.progress()
    }

    pub fn display(&self) -> String {
        self.session.display()
    }

    /// Wall-clock time the session will end if left running
    pub fn finish_time(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        if !self.session.is_running() {
            return None;
        }
        let remaining = i64::try_from(self.session.remaining_seconds()).ok()?;
        now.checked_add_signed(ChronoDuration::seconds(remaining))
    }

    fn stop_ticks(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.ticks.cancel();
    }
}

impl<T: TickSource> Drop for SessionTimer<T> {
    fn drop(&mut self) {
        self.ticks.cancel();
    }
}

fn clamp_minutes(minutes: u32) -> u32 {
    if minutes == 0 {
        log::warn!("session length of 0 minutes clamped to 1");
        return 1;
    }
    minutes
}
