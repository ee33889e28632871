//! Caller-clocked debouncing for search-as-you-type fields.
//!
//! The debouncer never sleeps or spawns; the host reports each keystroke
//! with `trigger` and asks `poll` on its own timer whether the quiet period
//! has passed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record an event at `now`, pushing the deadline out by `wait`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Returns `true` once per burst, the first time `now` reaches the
    /// deadline set by the most recent `trigger`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(300);

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.trigger(start);
        assert!(!d.poll(start + Duration::from_millis(299)));
        assert!(d.poll(start + WAIT));
        assert!(!d.poll(start + WAIT * 2));
        assert!(!d.is_pending());
    }

    #[test]
    fn retrigger_pushes_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.trigger(start);
        d.trigger(start + Duration::from_millis(200));
        assert!(!d.poll(start + WAIT));
        assert!(d.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_drops_pending_call() {
        let start = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.trigger(start);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.poll(start + WAIT));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut d = Debouncer::new(WAIT);
        assert!(!d.poll(Instant::now()));
    }
}
