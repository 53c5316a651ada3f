//! Countdown timer
//!
//! A tick-driven countdown at whole-second resolution. The owner drives it
//! by calling [`Countdown::tick`] once per elapsed second; the countdown
//! itself holds no clock and spawns nothing, which keeps it deterministic
//! under test.

use serde::{Deserialize, Serialize};

/// Emitted by [`Countdown::tick`] exactly once, on the tick that takes the
/// remaining time to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry;

/// A pausable whole-second countdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    time_left: u64,
    running: bool,
    expired: bool,
}

impl Countdown {
    /// Creates a stopped countdown with no time on it
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the countdown with `seconds` and starts it running
    pub fn start(&mut self, seconds: u64) {
        self.time_left = seconds;
        self.expired = seconds == 0;
        self.running = !self.expired;
    }

    /// Suspends the countdown, keeping the remaining time
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resumes a paused countdown; has no effect once expired
    pub fn resume(&mut self) {
        if !self.expired && self.time_left > 0 {
            self.running = true;
        }
    }

    /// Stops the countdown and clears the remaining time
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Seconds remaining
    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    /// Whether the countdown is currently ticking down
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advances the countdown by one second
    ///
    /// Returns [`Expiry`] on the tick that reaches zero and `None` on every
    /// other call, including ticks while paused and ticks after expiry.
    pub fn tick(&mut self) -> Option<Expiry> {
        if !self.running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.running = false;
            self.expired = true;
            return Some(Expiry);
        }
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_zero_and_fires_once() {
        let mut countdown = Countdown::new();
        countdown.start(3);

        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.time_left(), 2);
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.tick(), Some(Expiry));
        assert!(countdown.is_expired());
        assert!(!countdown.is_running());

        // further ticks are inert
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.time_left(), 0);
    }

    #[test]
    fn test_pause_freezes_remaining_time() {
        let mut countdown = Countdown::new();
        countdown.start(10);
        countdown.tick();
        countdown.pause();

        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.time_left(), 9);

        countdown.resume();
        assert!(countdown.is_running());
        countdown.tick();
        assert_eq!(countdown.time_left(), 8);
    }

    #[test]
    fn test_resume_after_expiry_does_nothing() {
        let mut countdown = Countdown::new();
        countdown.start(1);
        assert_eq!(countdown.tick(), Some(Expiry));

        countdown.resume();
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), None);
    }

    #[test]
    fn test_start_with_zero_is_immediately_expired() {
        let mut countdown = Countdown::new();
        countdown.start(0);
        assert!(countdown.is_expired());
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut countdown = Countdown::new();
        countdown.start(5);
        countdown.tick();
        countdown.reset();

        assert_eq!(countdown, Countdown::new());
    }

    #[test]
    fn test_restart_after_expiry_rearms() {
        let mut countdown = Countdown::new();
        countdown.start(1);
        countdown.tick();
        assert!(countdown.is_expired());

        countdown.start(2);
        assert!(!countdown.is_expired());
        assert!(countdown.is_running());
        assert_eq!(countdown.time_left(), 2);
    }
}
