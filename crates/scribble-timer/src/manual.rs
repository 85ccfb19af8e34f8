//! A fake clock for deterministic tests.

use std::time::Duration;

use crate::{Scheduler, TimerHandle};

struct Pending<E> {
    due: Duration,
    handle: TimerHandle,
    event: E,
}

/// A [`Scheduler`] whose time only moves when told to.
///
/// Time is measured from the scheduler's creation. Events fire in due
/// order; timers due at the same instant fire in the order they were
/// scheduled.
///
/// ```rust
/// use std::time::Duration;
/// use scribble_timer::{ManualScheduler, Scheduler};
///
/// let mut clock = ManualScheduler::new();
/// clock.schedule(Duration::from_secs(3), "next round");
///
/// assert_eq!(clock.pop_due(Duration::from_secs(2)), None);
/// assert_eq!(clock.pop_due(Duration::from_secs(3)), Some("next round"));
/// assert_eq!(clock.now(), Duration::from_secs(3));
/// ```
pub struct ManualScheduler<E> {
    now: Duration,
    next_id: u64,
    queue: Vec<Pending<E>>,
}

impl<E> ManualScheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            queue: Vec::new(),
        }
    }

    /// Current fake time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the earliest pending timer is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.iter().map(|p| p.due).min()
    }

    /// Removes and returns the earliest event due at or before `until`,
    /// moving the clock forward to its due time.
    ///
    /// Call in a loop, handling each event before popping the next: an
    /// event handler may schedule new timers that fall inside the window.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle))
            .map(|(idx, _)| idx)?;
        let pending = self.queue.remove(idx);
        self.now = self.now.max(pending.due);
        Some(pending.event)
    }

    /// Moves the clock forward without firing anything. Never moves it
    /// backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl<E> Default for ManualScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> for ManualScheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;
        self.queue.push(Pending {
            due: self.now + delay,
            handle,
            event,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|p| p.handle != handle);
        self.queue.len() != before
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
