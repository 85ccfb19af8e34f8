//! Cancellable one-shot timers for Scribble.
//!
//! Rounds are driven by a handful of delayed events per room: reveal the
//! hint at half time, end the round at full time, start the next round
//! after a cooldown. This crate provides the capability the round state
//! machine is written against:
//!
//! ```text
//! schedule(delay, event) → TimerHandle
//! cancel(handle)
//! ```
//!
//! A timer does not run code when it fires. It hands its `event` value
//! back to whoever owns the receiving end, so the event re-enters the same
//! single-threaded handling path as player input.
//!
//! # Implementations
//!
//! - [`TokioScheduler`]: each timer is a Tokio task that sleeps and then
//!   sends its event into an mpsc channel. Used by the server.
//! - [`ManualScheduler`]: a fake clock. Nothing fires until the test
//!   pops due events, so round timing is fully deterministic.

mod manual;
mod runtime;

use std::fmt;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// Identifies one scheduled timer. Unique per scheduler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedules events to be delivered after a delay.
pub trait Scheduler<E> {
    /// Arranges for `event` to be delivered once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle;

    /// Cancels a timer. Returns `true` if it was still pending.
    ///
    /// Cancelling a timer that already fired (or was already cancelled)
    /// is a harmless no-op. An event that fired but has not been consumed
    /// yet may still be delivered; consumers guard against stale events.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Number of timers that have neither fired nor been cancelled.
    fn pending(&self) -> usize;
}
