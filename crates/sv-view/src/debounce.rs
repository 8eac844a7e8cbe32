//! Cancellable trailing-edge debounce timer.
//!
//! The timer holds the latest value pushed and the instant at which it
//! becomes due. Time is supplied by the caller, so behavior is fully
//! deterministic.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace any pending value and re-arm the timer from `at`.
    pub fn push(&mut self, value: T, at: Instant) {
        self.pending = Some((value, at + self.window));
    }

    /// Take the pending value if its quiet window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_last_write_wins() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push("f", t0);
        d.push("fa", t0 + Duration::from_millis(100));
        d.push("fai", t0 + Duration::from_millis(150));
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(350)), Some("fai"));
        assert_eq!(d.poll(t0 + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_fires_at_most_once_per_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push(1, t0);
        assert_eq!(d.poll(t0 + WINDOW), Some(1));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_deadline_follows_latest_push() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        assert_eq!(d.deadline(), None);
        d.push(1, t0);
        assert_eq!(d.deadline(), Some(t0 + WINDOW));
        d.push(2, t0 + Duration::from_millis(50));
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(50) + WINDOW));
        assert_eq!(d.poll(t0 + Duration::from_millis(250)), Some(2));
        assert_eq!(d.deadline(), None);
    }
}
