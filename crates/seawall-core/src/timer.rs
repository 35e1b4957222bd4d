//! Per-turn countdown timer.
//!
//! The timer is driven, never self-running: the orchestration layer
//! feeds it whole-second `tick`s, or sub-second `advance` slices when a
//! host maps real time onto the logical clock. Reaching zero reports a
//! timeout exactly once and the timer then holds at zero until it is
//! explicitly restarted.

use serde::{Deserialize, Serialize};

/// Seconds remaining at which the warning flag raises
const WARNING_SECS: u32 = 2;

/// Seconds remaining at which the critical flag raises
const CRITICAL_SECS: u32 = 1;

/// Countdown for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTimer {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
    carry_ms: u64,
}

impl TurnTimer {
    /// A stopped timer with `duration_secs` on the clock.
    ///
    /// `duration_secs` must be at least 1; the controller validates its
    /// configuration before constructing one.
    pub fn new(duration_secs: u32) -> Self {
        assert!(duration_secs > 0, "turn duration must be positive");
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            carry_ms: 0,
        }
    }

    /// Reset to the full duration and run
    pub fn start(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.carry_ms = 0;
        self.running = true;
    }

    /// Stop counting; remaining time is kept
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop counting without resetting remaining time
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue counting from the remaining time
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Reset to the full duration and run
    pub fn restart(&mut self) {
        self.start();
    }

    /// Reset to the full duration, stopped
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.carry_ms = 0;
        self.running = false;
    }

    /// Advance by one whole second.
    ///
    /// Returns `true` on the tick that reaches zero. Further ticks while
    /// held at zero return `false`, so a stray extra tick cannot fire
    /// the timeout twice.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    /// Advance by `ms` milliseconds, ticking on each second boundary.
    ///
    /// Returns `true` if the countdown reached zero within this slice.
    pub fn advance(&mut self, ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.carry_ms += ms;
        let mut timed_out = false;
        while self.carry_ms >= 1000 {
            self.carry_ms -= 1000;
            if self.tick() {
                timed_out = true;
            }
        }
        timed_out
    }

    /// Milliseconds until the next second boundary, while counting
    pub fn ms_until_tick(&self) -> Option<u64> {
        if self.running && self.remaining_secs > 0 {
            Some(1000 - self.carry_ms)
        } else {
            None
        }
    }

    /// Seconds left on the clock
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as a percentage of the full duration
    pub fn percentage(&self) -> f32 {
        self.remaining_secs as f32 / self.duration_secs as f32 * 100.0
    }

    /// Whether the countdown is inside the warning zone
    pub fn in_warning_zone(&self) -> bool {
        self.remaining_secs <= WARNING_SECS && self.remaining_secs > 0
    }

    /// Whether the countdown is on its final second
    pub fn is_critical(&self) -> bool {
        self.remaining_secs <= CRITICAL_SECS && self.remaining_secs > 0
    }

    /// Read-only view for snapshots
    pub fn view(&self) -> TimerView {
        TimerView {
            remaining_secs: self.remaining_secs,
            percentage: self.percentage(),
            is_running: self.running,
            in_warning_zone: self.in_warning_zone(),
            is_critical: self.is_critical(),
        }
    }
}

/// Timer state as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub remaining_secs: u32,
    pub percentage: f32,
    pub is_running: bool,
    pub in_warning_zone: bool,
    pub is_critical: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_ticks_time_out_exactly_once() {
        let mut timer = TurnTimer::new(5);
        timer.start();

        for _ in 0..4 {
            assert!(!timer.tick());
        }
        assert!(timer.tick());
        assert_eq!(timer.remaining_secs(), 0);

        // A stray sixth tick must not fire again.
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_tick_does_nothing_while_stopped() {
        let mut timer = TurnTimer::new(5);
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn test_pause_and_resume_keep_remaining() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        timer.tick();
        timer.tick();

        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 3);

        timer.resume();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn test_restart_refills_and_runs() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        timer.tick();
        timer.restart();

        assert_eq!(timer.remaining_secs(), 5);
        assert!(timer.is_running());
    }

    #[test]
    fn test_reset_refills_and_stops() {
        let mut timer = TurnTimer::new(5);
        timer.start();
        timer.tick();
        timer.reset();

        assert_eq!(timer.remaining_secs(), 5);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_warning_and_critical_zones() {
        let mut timer = TurnTimer::new(5);
        timer.start();

        assert!(!timer.in_warning_zone());
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.in_warning_zone());
        assert!(!timer.is_critical());

        timer.tick();
        assert!(timer.in_warning_zone());
        assert!(timer.is_critical());

        timer.tick();
        // Zero is expired, not critical.
        assert!(!timer.in_warning_zone());
        assert!(!timer.is_critical());
    }

    #[test]
    fn test_percentage() {
        let mut timer = TurnTimer::new(4);
        timer.start();
        timer.tick();
        assert_eq!(timer.percentage(), 75.0);
    }

    #[test]
    fn test_advance_accumulates_sub_second_slices() {
        let mut timer = TurnTimer::new(2);
        timer.start();

        assert!(!timer.advance(900));
        assert_eq!(timer.remaining_secs(), 2);
        assert!(!timer.advance(100));
        assert_eq!(timer.remaining_secs(), 1);
        assert!(timer.advance(1000));
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.advance(5000));
    }

    #[test]
    fn test_advance_spanning_several_seconds_fires_once() {
        let mut timer = TurnTimer::new(3);
        timer.start();
        assert!(timer.advance(10_000));
        assert_eq!(timer.remaining_secs(), 0);
    }
}
