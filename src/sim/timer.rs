//! Virtual clock timers
//!
//! The session runs on an integer millisecond clock. Repeating work uses an
//! [`Interval`], one-shot work a [`Timeout`]. Cancelling is dropping the timer.

use serde::{Deserialize, Serialize};

/// Timers the session owns, in tie-break order for equal due times
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    SaberDamping,
    SaberDecay,
    Collision,
    Spawn,
}

/// Fixed-rate repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

impl Interval {
    /// First firing one period after `now_ms`
    pub fn starting_at(now_ms: u64, period_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Move to the next firing after this one ran
    pub fn rearm(&mut self) {
        self.next_due_ms += self.period_ms;
    }
}

/// One-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeout {
    due_ms: u64,
}

impl Timeout {
    pub fn after(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            due_ms: now_ms + delay_ms,
        }
    }

    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Converts host frame timestamps (ms, fractional) into whole elapsed ms
///
/// Long stalls (tab in background, debugger) are capped so the simulation
/// does not try to catch up on seconds of ticks at once.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    carry: f64,
}

impl FrameClock {
    /// Longest gap fed to the simulation in one frame
    pub const MAX_FRAME_MS: f64 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed whole milliseconds since the previous call
    pub fn elapsed_ms(&mut self, time_ms: f64) -> u64 {
        let Some(last) = self.last_time.replace(time_ms) else {
            return 0;
        };
        let dt = (time_ms - last).clamp(0.0, Self::MAX_FRAME_MS) + self.carry;
        let whole = dt.floor();
        self.carry = dt - whole;
        whole as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_rearms_by_period() {
        let mut interval = Interval::starting_at(100, 16);
        assert_eq!(interval.due_ms(), 116);
        interval.rearm();
        interval.rearm();
        assert_eq!(interval.due_ms(), 148);
    }

    #[test]
    fn test_zero_period_clamped() {
        let interval = Interval::starting_at(0, 0);
        assert_eq!(interval.period_ms(), 1);
    }

    #[test]
    fn test_timeout_due() {
        assert_eq!(Timeout::after(40, 1500).due_ms(), 1540);
    }

    #[test]
    fn test_tie_break_order() {
        assert!(TimerKind::SaberDamping < TimerKind::Collision);
        assert!(TimerKind::Collision < TimerKind::Spawn);
    }

    #[test]
    fn test_frame_clock_carries_fractions() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed_ms(1000.0), 0);
        assert_eq!(clock.elapsed_ms(1016.6), 16);
        assert_eq!(clock.elapsed_ms(1033.2), 17);
    }

    #[test]
    fn test_frame_clock_caps_stalls() {
        let mut clock = FrameClock::new();
        clock.elapsed_ms(0.0);
        assert_eq!(clock.elapsed_ms(5000.0), 100);
        // Clock going backwards is treated as no time passing
        assert_eq!(clock.elapsed_ms(4000.0), 0);
    }
}
