//! Autorun: periodic navigation on a pausable timer.
//!
//! The scheduler owns only the timing. What a firing *does* — stepping
//! in the last manual direction, wrapping with a fade when the repeat
//! flag allows — is decided by the widget, which also stops the timer
//! on any user interaction and restarts it once the resulting move
//! completes.

use whirl_common::clock::TimestampMs;

/// Pausable repeating timer with a fixed delay.
#[derive(Debug, Clone)]
pub struct AutorunScheduler {
    delay_ms: Option<u64>,
    paused: bool,
    next_fire_at: Option<TimestampMs>,
}

impl AutorunScheduler {
    /// `delay_ms` of `None` disables autorun entirely.
    pub fn new(delay_ms: Option<u64>) -> Self {
        Self {
            delay_ms,
            paused: false,
            next_fire_at: None,
        }
    }

    /// Arm the timer. Idempotent: an already-running timer keeps its
    /// cadence.
    pub fn start(&mut self, now_ms: TimestampMs) {
        if let Some(delay) = self.delay_ms {
            if self.next_fire_at.is_none() {
                self.next_fire_at = Some(now_ms + delay);
            }
        }
    }

    /// Disarm the timer. Idempotent.
    pub fn stop(&mut self) {
        self.next_fire_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire_at.is_some()
    }

    /// Pause keeps the cadence running but suppresses firings.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the timer fires at `now_ms`. Advances the cadence either
    /// way; a paused firing is swallowed, not deferred.
    pub fn due(&mut self, now_ms: TimestampMs) -> bool {
        let (Some(at), Some(delay)) = (self.next_fire_at, self.delay_ms) else {
            return false;
        };
        if now_ms < at {
            return false;
        }
        self.next_fire_at = Some(at + delay);
        !self.paused
    }

    pub fn next_deadline(&self) -> Option<TimestampMs> {
        self.next_fire_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_delay() {
        let mut autorun = AutorunScheduler::new(None);
        autorun.start(0);
        assert!(!autorun.is_running());
        assert!(!autorun.due(10_000));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut autorun = AutorunScheduler::new(Some(1000));
        autorun.start(0);
        autorun.start(700);
        assert_eq!(autorun.next_deadline(), Some(1000));
    }

    #[test]
    fn test_fires_on_cadence() {
        let mut autorun = AutorunScheduler::new(Some(1000));
        autorun.start(0);
        assert!(!autorun.due(999));
        assert!(autorun.due(1000));
        assert_eq!(autorun.next_deadline(), Some(2000));
        assert!(autorun.due(2000));
    }

    #[test]
    fn test_paused_firing_is_swallowed() {
        let mut autorun = AutorunScheduler::new(Some(1000));
        autorun.start(0);
        autorun.set_paused(true);
        assert!(!autorun.due(1000));
        // cadence advanced regardless
        assert_eq!(autorun.next_deadline(), Some(2000));
        autorun.set_paused(false);
        assert!(autorun.due(2000));
    }

    #[test]
    fn test_stop_then_restart_rebases() {
        let mut autorun = AutorunScheduler::new(Some(1000));
        autorun.start(0);
        autorun.stop();
        assert!(!autorun.due(5000));
        autorun.start(5000);
        assert_eq!(autorun.next_deadline(), Some(6000));
    }
}
