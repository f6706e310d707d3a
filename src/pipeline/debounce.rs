//! Trailing-edge debounce.
//!
//! Every edit calls [`Debouncer::notify`], which pushes the deadline out by
//! the quiescence window. The event loop calls [`Debouncer::poll`] with the
//! current time; it returns `true` exactly once per quiet period, after the
//! last edit has aged past the window. There is no leading-edge fire.
//!
//! Time is passed in explicitly so the scheduler has no clock of its own and
//! can be driven with synthetic instants in tests.

use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
    pending_edits: u32,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            pending_edits: 0,
        }
    }

    /// Quiescence window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an edit at `now`, discarding any previously armed deadline.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
        self.pending_edits = self.pending_edits.saturating_add(1);
    }

    /// Returns `true` once when the armed deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                trace!(coalesced = self.pending_edits, "debounce fired");
                self.deadline = None;
                self.pending_edits = 0;
                true
            }
            _ => false,
        }
    }

    /// Armed deadline, if an edit is waiting for quiescence.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, saturating at zero.
    ///
    /// The event loop uses this as its input poll timeout.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop a pending fire without invoking anything.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending_edits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(700);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_no_fire_without_edits() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert!(!d.poll(t0));
        assert!(!d.poll(t0 + ms(10_000)));
        assert!(d.deadline().is_none());
    }

    #[test]
    fn test_single_edit_fires_after_window() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        d.notify(t0);

        assert!(!d.poll(t0));
        assert!(!d.poll(t0 + ms(699)));
        assert!(d.poll(t0 + ms(700)));
        // Only once
        assert!(!d.poll(t0 + ms(701)));
        assert!(!d.poll(t0 + ms(5000)));
    }

    #[test]
    fn test_burst_coalesces_to_one_fire() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();

        let mut fires = 0;
        for i in 0..20 {
            let t = t0 + ms(i * 100);
            d.notify(t);
            if d.poll(t) {
                fires += 1;
            }
        }
        // Last edit at 1900ms; nothing should fire before 2600ms
        assert!(!d.poll(t0 + ms(2599)));
        if d.poll(t0 + ms(2600)) {
            fires += 1;
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn test_notify_restarts_timer() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        d.notify(t0);
        d.notify(t0 + ms(600));

        // Original deadline (700) discarded
        assert!(!d.poll(t0 + ms(700)));
        assert_eq!(d.deadline(), Some(t0 + ms(1300)));
        assert!(d.poll(t0 + ms(1300)));
    }

    #[test]
    fn test_time_remaining() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        assert_eq!(d.time_remaining(t0), None);

        d.notify(t0);
        assert_eq!(d.time_remaining(t0 + ms(200)), Some(ms(500)));
        assert_eq!(d.time_remaining(t0 + ms(900)), Some(Duration::ZERO));
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();

        d.notify(t0);
        assert!(d.poll(t0 + ms(800)));

        d.notify(t0 + ms(1000));
        assert!(!d.poll(t0 + ms(1500)));
        assert!(d.poll(t0 + ms(1700)));
    }

    #[test]
    fn test_cancel() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        d.notify(t0);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.poll(t0 + ms(1000)));
    }
}
