//! folio Runtime
//!
//! The cooperative, single-threaded machinery page behaviors run on:
//!
//! - [`EventLoop`]: virtual-clock timeouts and intervals
//! - [`TaskHandle`]: cancellation shared by every timer of one task
//! - [`Debouncer`]: trailing-edge coalescing of bursts of triggers
//! - [`IntersectionObserver`]: threshold-crossing visibility reports

mod event_loop;
mod debounce;
mod intersection_observer;

pub use event_loop::{EventLoop, TaskHandle, TimerId};
pub use debounce::Debouncer;
pub use intersection_observer::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverOptions, RootMargin,
};

/// Runtime errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("Invalid root margin `{0}`")]
    InvalidRootMargin(String),

    #[error("Threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
}
