// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::time::{Duration, Instant};

/// Quiet period before a search term is acted on.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds back rapidly changing input until it has been stable for `delay`.
///
/// Time is supplied by the caller, so the owner decides when to poll (a UI
/// tick, a key event) and tests can drive it without sleeping. Every `push`
/// restarts the quiet period; only the last pushed value is ever promoted.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new raw value, cancelling any pending one.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Promotes the pending value once the quiet period has elapsed.
    /// Returns true only when the settled value actually changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ready = matches!(
            &self.pending,
            Some((_, since)) if now.saturating_duration_since(*since) >= self.delay
        );
        if !ready {
            return false;
        }
        match self.pending.take() {
            Some((value, _)) if value != self.settled => {
                self.settled = value;
                true
            }
            _ => false,
        }
    }

    /// Skips the quiet period.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((value, _)) if value != self.settled => {
                self.settled = value;
                true
            }
            _ => false,
        }
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes eligible, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotes_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(String::new(), SEARCH_DEBOUNCE);

        d.push("ist".to_string(), start);
        assert!(!d.poll(start + Duration::from_millis(499)));
        assert_eq!(d.settled(), "");
        assert!(d.poll(start + Duration::from_millis(500)));
        assert_eq!(d.settled(), "ist");
        assert!(!d.is_pending());
    }

    #[test]
    fn test_push_restarts_timer() {
        let start = Instant::now();
        let mut d = Debouncer::new(String::new(), SEARCH_DEBOUNCE);

        d.push("i".to_string(), start);
        d.push("is".to_string(), start + Duration::from_millis(300));
        d.push("ist".to_string(), start + Duration::from_millis(600));

        // 500ms after the first push, but only 200ms after the last
        assert!(!d.poll(start + Duration::from_millis(800)));
        assert!(d.poll(start + Duration::from_millis(1100)));
        assert_eq!(d.settled(), "ist");
    }

    #[test]
    fn test_unchanged_value_reports_no_change() {
        let start = Instant::now();
        let mut d = Debouncer::new("ist".to_string(), SEARCH_DEBOUNCE);
        d.push("ist".to_string(), start);
        assert!(!d.poll(start + SEARCH_DEBOUNCE));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_flush_and_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new(0u32, Duration::from_millis(100));
        assert_eq!(d.deadline(), None);
        d.push(7, start);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(100)));
        assert!(d.flush());
        assert_eq!(*d.settled(), 7);
    }
}
