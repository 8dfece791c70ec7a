//! One-shot timer tasks for a cooperative run loop.
//!
//! Nothing here sleeps. The owner polls the tasks with the current time and
//! uses [`TickResult`] to decide how long it may wait before polling again.

use embassy_time::{Duration, Instant};

/// Timing info returned by a run loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// The earliest deadline of any armed task.
    pub next_deadline: Instant,
    /// How long to wait until that deadline (zero if already due).
    pub sleep_duration: Duration,
}

impl TickResult {
    /// Build the timing info for a deadline as seen from `now`.
    pub fn until(next_deadline: Instant, now: Instant) -> Self {
        let sleep_duration = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_millis(0)
        };
        Self {
            next_deadline,
            sleep_duration,
        }
    }
}

/// Single-shot, re-armable timer.
///
/// After [`start`](Self::start) the task fires exactly once, on the first
/// [`poll`](Self::poll) at or after its deadline. It must be started again
/// to fire again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShotTask {
    deadline: Option<Instant>,
}

impl OneShotTask {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the task to fire `delay` after `now`, replacing any previous deadline.
    pub fn start(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the task. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if the task is due, disarming it when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Poll a task used as a fixed-rate timer.
    ///
    /// When it fires, the task is re-armed `period` after the deadline that
    /// was due rather than after `now`, so late polls do not push the
    /// schedule back. If the loop has fallen more than two periods behind,
    /// the backlog is skipped and the schedule restarts from `now`.
    pub fn poll_periodic(&mut self, now: Instant, period: Duration) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let max_drift = period + period;
        let base = if now > deadline + max_drift {
            now
        } else {
            deadline
        };
        self.deadline = Some(base + period);
        true
    }
}
