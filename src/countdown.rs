use std::time::Duration;

use tokio::time::Instant;

/// Remaining display time of a toast.
///
/// Drives both the dismiss timer (through [`Countdown::deadline`]) and the
/// progress bar (through [`Countdown::fraction`]), so the bar is empty exactly
/// when the timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    running_since: Option<Instant>,
}

impl Countdown {
    /// A countdown that never runs out and keeps the bar full.
    pub fn persistent() -> Self {
        Self::default()
    }

    pub fn start(total: Duration, now: Instant) -> Self {
        Self {
            total,
            remaining: total,
            running_since: (!total.is_zero()).then_some(now),
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    /// Share of the total still left, in `0.0..=1.0`.
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        (self.remaining(now).as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// When the countdown reaches zero, if it is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.running_since.map(|since| since + self.remaining)
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn is_persistent(&self) -> bool {
        self.total.is_zero()
    }

    pub fn is_paused(&self) -> bool {
        !self.is_persistent() && !self.is_running() && !self.remaining.is_zero()
    }

    /// Whether a running countdown has reached zero.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.is_running() && self.remaining(now).is_zero()
    }

    /// Freezes the remaining time. Returns `false` if it was not running or
    /// has already run out.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.is_running() || self.is_expired(now) {
            return false;
        }
        self.remaining = self.remaining(now);
        self.running_since = None;
        true
    }

    /// Continues from the frozen remaining time. Returns `false` unless paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.running_since = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_tracks_elapsed_time() {
        let start = Instant::now();
        let countdown = Countdown::start(Duration::from_secs(4), start);

        assert_eq!(countdown.fraction(start), 1.0);
        assert!((countdown.fraction(start + Duration::from_secs(1)) - 0.75).abs() < 1e-9);
        assert_eq!(countdown.fraction(start + Duration::from_secs(4)), 0.0);
        assert_eq!(countdown.fraction(start + Duration::from_secs(9)), 0.0);
    }

    #[test]
    fn deadline_is_start_plus_total() {
        let start = Instant::now();
        let countdown = Countdown::start(Duration::from_millis(3000), start);
        assert_eq!(countdown.deadline(), Some(start + Duration::from_millis(3000)));
    }

    #[test]
    fn pause_freezes_and_resume_shifts_the_deadline() {
        let start = Instant::now();
        let mut countdown = Countdown::start(Duration::from_secs(3), start);

        let paused_at = start + Duration::from_secs(1);
        assert!(countdown.pause(paused_at));
        assert!(countdown.is_paused());
        assert_eq!(countdown.deadline(), None);

        let later = paused_at + Duration::from_secs(10);
        assert_eq!(countdown.remaining(later), Duration::from_secs(2));
        assert!((countdown.fraction(later) - 2.0 / 3.0).abs() < 1e-9);

        assert!(countdown.resume(later));
        assert_eq!(countdown.deadline(), Some(later + Duration::from_secs(2)));
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let start = Instant::now();
        let mut countdown = Countdown::start(Duration::from_secs(3), start);

        assert!(!countdown.resume(start));
        assert!(countdown.pause(start));
        assert!(!countdown.pause(start));
        assert!(countdown.resume(start));
        assert!(!countdown.resume(start));
        assert_eq!(countdown.deadline(), Some(start + Duration::from_secs(3)));
    }

    #[test]
    fn expired_countdown_cannot_be_paused() {
        let start = Instant::now();
        let mut countdown = Countdown::start(Duration::from_millis(50), start);
        let late = start + Duration::from_millis(100);

        assert!(countdown.is_expired(late));
        assert!(!countdown.pause(late));
        assert!(countdown.is_running());
        assert_eq!(countdown.fraction(late), 0.0);
    }

    #[test]
    fn persistent_countdown_never_runs() {
        let start = Instant::now();
        let mut countdown = Countdown::persistent();

        assert!(countdown.is_persistent());
        assert_eq!(countdown.deadline(), None);
        assert_eq!(countdown.fraction(start + Duration::from_secs(60)), 1.0);
        assert!(!countdown.pause(start));
        assert!(!countdown.resume(start));
    }
}
