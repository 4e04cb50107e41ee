//! Trailing-edge debounce
//!
//! Each trigger cancels the pending run and re-arms it, so a burst of
//! triggers produces exactly one job `delay_ms` after the last one.

use crate::{EventLoop, TaskHandle};

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<TaskHandle>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms, pending: None }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Re-arm the debounced job
    pub fn trigger<J: Clone>(&mut self, event_loop: &mut EventLoop<J>, job: J) {
        self.cancel();
        self.pending = Some(event_loop.set_timeout(job, self.delay_ms));
    }

    /// Mark the pending run as delivered
    pub fn settle(&mut self) {
        self.pending = None;
    }

    /// Whether a run is armed and not yet delivered
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_stopped())
    }

    /// Drop the pending run, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_coalesces_to_one_run() {
        let mut loop_ = EventLoop::new();
        let mut debouncer = Debouncer::new(10);

        let mut fired = Vec::new();
        for _ in 0..20 {
            debouncer.trigger(&mut loop_, "scroll");
            fired.extend(loop_.tick(3));
        }
        assert!(fired.is_empty());
        assert!(debouncer.is_pending());

        fired.extend(loop_.tick(10));
        assert_eq!(fired, vec!["scroll"]);
        debouncer.settle();
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_spaced_triggers_each_fire() {
        let mut loop_ = EventLoop::new();
        let mut debouncer = Debouncer::new(10);

        debouncer.trigger(&mut loop_, 1);
        assert_eq!(loop_.tick(15), vec![1]);
        debouncer.trigger(&mut loop_, 2);
        assert_eq!(loop_.tick(15), vec![2]);
    }

    #[test]
    fn test_cancel() {
        let mut loop_ = EventLoop::new();
        let mut debouncer = Debouncer::new(10);
        debouncer.trigger(&mut loop_, ());
        debouncer.cancel();
        assert!(loop_.tick(20).is_empty());
    }
}
