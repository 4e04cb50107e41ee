//! Event Loop Implementation
//!
//! Timer queue driven by a virtual millisecond clock. The host advances the
//! clock; due jobs come out one at a time so a job may schedule follow-up
//! timers that still fall inside the same advance.

use std::cell::Cell;
use std::rc::Rc;

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Cancellation handle for a task
///
/// Every timer scheduled through the same handle is cancelled by one
/// [`stop`](TaskHandle::stop), which lets a self-rescheduling chain of
/// timeouts behave like a single task.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every pending and future timer linked to this handle
    pub fn stop(&self) {
        self.cancelled.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.get()
    }
}

/// Timer entry
#[derive(Debug)]
struct Timer<J> {
    id: u32,
    job: J,
    delay_ms: u64,
    due_at: u64,
    is_interval: bool,
    handle: TaskHandle,
}

/// Timer-driven event loop
#[derive(Debug)]
pub struct EventLoop<J> {
    /// Pending timers
    timers: Vec<Timer<J>>,
    /// Next timer ID
    next_timer_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl<J> Default for EventLoop<J> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_timer_id: 1,
            current_time: 0,
        }
    }
}

impl<J: Clone> EventLoop<J> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current time
    pub fn now(&self) -> u64 {
        self.current_time
    }

    /// Set a timeout under a fresh task handle
    pub fn set_timeout(&mut self, job: J, delay_ms: u64) -> TaskHandle {
        let handle = TaskHandle::new();
        self.schedule(&handle, job, delay_ms);
        handle
    }

    /// Set an interval under a fresh task handle
    pub fn set_interval(&mut self, job: J, period_ms: u64) -> TaskHandle {
        let handle = TaskHandle::new();
        self.schedule_interval(&handle, job, period_ms);
        handle
    }

    /// Schedule a one-shot timer linked to an existing handle
    pub fn schedule(&mut self, handle: &TaskHandle, job: J, delay_ms: u64) -> TimerId {
        self.push_timer(handle, job, delay_ms, false)
    }

    /// Schedule a repeating timer linked to an existing handle
    pub fn schedule_interval(&mut self, handle: &TaskHandle, job: J, period_ms: u64) -> TimerId {
        // A zero period would never let the clock move
        self.push_timer(handle, job, period_ms.max(1), true)
    }

    fn push_timer(&mut self, handle: &TaskHandle, job: J, delay_ms: u64, is_interval: bool) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timers.push(Timer {
            id,
            job,
            delay_ms,
            due_at: self.current_time + delay_ms,
            is_interval,
            handle: handle.clone(),
        });
        TimerId(id)
    }

    /// Clear a single timeout/interval
    pub fn clear_timer(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id.0);
    }

    /// Drop every timer
    pub fn clear_all(&mut self) {
        for timer in &self.timers {
            timer.handle.stop();
        }
        self.timers.clear();
    }

    fn purge_cancelled(&mut self) {
        self.timers.retain(|t| !t.handle.is_stopped());
    }

    /// Pop the earliest job due at or before `deadline`
    ///
    /// The clock moves to the job's due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: u64) -> Option<J> {
        self.purge_cancelled();

        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= deadline)
            .min_by_key(|(_, t)| (t.due_at, t.id))
            .map(|(i, _)| i)?;

        let due_at = self.timers[index].due_at;
        self.current_time = self.current_time.max(due_at);

        if self.timers[index].is_interval {
            let timer = &mut self.timers[index];
            timer.due_at += timer.delay_ms;
            Some(timer.job.clone())
        } else {
            Some(self.timers.remove(index).job)
        }
    }

    /// Move the clock forward (never backwards)
    pub fn advance_clock(&mut self, to: u64) {
        self.current_time = self.current_time.max(to);
    }

    /// Advance time and collect every job that became due
    ///
    /// Jobs collected here cannot schedule follow-ups inside the same span;
    /// callers that need that use [`pop_due`](Self::pop_due) directly.
    pub fn tick(&mut self, delta_ms: u64) -> Vec<J> {
        let deadline = self.current_time + delta_ms;
        let mut due = Vec::new();
        while let Some(job) = self.pop_due(deadline) {
            due.push(job);
        }
        self.advance_clock(deadline);
        due
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.handle.is_stopped()).count()
    }

    /// Check if there's pending work
    pub fn has_pending_work(&self) -> bool {
        self.pending() > 0
    }

    /// Milliseconds until the next live timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .iter()
            .filter(|t| !t.handle.is_stopped())
            .map(|t| t.due_at.saturating_sub(self.current_time))
            .min()
    }
}
