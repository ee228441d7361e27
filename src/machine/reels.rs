//! Reel columns and per-reel timers.

use crate::config::ReelTiming;
use crate::symbols::SymbolId;
use serde::Serialize;
use std::time::Duration;

/// The three visible cells of one reel. Only `center` is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Cosmetic top cell.
    pub top: SymbolId,
    /// Scoring cell.
    pub center: SymbolId,
    /// Cosmetic bottom cell.
    pub bottom: SymbolId,
}

/// Pending timer deadlines for one reel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReelTimer {
    next_flicker: Option<Duration>,
    stop_at: Option<Duration>,
}

impl ReelTimer {
    /// Replace any pending deadlines with a fresh spin schedule.
    pub(crate) fn arm(&mut self, now: Duration, timing: &ReelTiming, reel: usize) {
        self.clear();
        self.next_flicker = Some(now + timing.flicker());
        self.stop_at = Some(now + timing.stop_delay(reel));
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn stop_due(&self, now: Duration) -> bool {
        self.stop_at.is_some_and(|t| t <= now)
    }

    pub(crate) fn flicker_due(&self, now: Duration) -> bool {
        self.next_flicker.is_some_and(|t| t <= now)
    }

    /// Schedule the next flicker one interval after `now`.
    ///
    /// Missed intervals are dropped rather than replayed.
    pub(crate) fn rearm_flicker(&mut self, now: Duration, interval: Duration) {
        if self.next_flicker.is_some() {
            self.next_flicker = Some(now + interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_schedules_stop_per_reel() {
        let timing = ReelTiming::default();
        let mut timer = ReelTimer::default();
        timer.arm(Duration::from_millis(100), &timing, 2);
        assert!(!timer.stop_due(Duration::from_millis(2199)));
        assert!(timer.stop_due(Duration::from_millis(2200)));
        assert!(timer.flicker_due(Duration::from_millis(160)));
    }

    #[test]
    fn test_rearm_skips_missed_intervals() {
        let timing = ReelTiming::default();
        let mut timer = ReelTimer::default();
        timer.arm(Duration::ZERO, &timing, 0);
        timer.rearm_flicker(Duration::from_millis(500), timing.flicker());
        assert!(!timer.flicker_due(Duration::from_millis(559)));
        assert!(timer.flicker_due(Duration::from_millis(560)));
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut timer = ReelTimer::default();
        timer.arm(Duration::ZERO, &ReelTiming::default(), 1);
        timer.clear();
        assert!(!timer.stop_due(Duration::MAX));
        assert!(!timer.flicker_due(Duration::MAX));
    }
}
