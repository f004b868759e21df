//! The repeating turn timer.
//!
//! A `TickTimer` holds at most one armed schedule. It does not read a clock;
//! callers feed it elapsed time and it reports how many ticks came due.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    interval: Duration,
    elapsed: Duration,
    armed: bool,
    /// Bumped on every arm; lets callers tell two schedules apart.
    generation: u64,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            armed: false,
            generation: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel any pending schedule and arm a new one at `interval`.
    /// Progress toward the next tick starts over.
    pub fn reschedule(&mut self, interval: Duration) {
        self.cancel();
        self.interval = interval;
        self.armed = true;
        self.generation += 1;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    /// Time left before the next tick, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.armed
            .then(|| self.interval.saturating_sub(self.elapsed))
    }

    /// Advance by `delta`. Returns true when a tick is due; the overshoot is
    /// kept so a long frame can yield several ticks through repeated calls
    /// with `Duration::ZERO`.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.armed || self.interval.is_zero() {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}
