//! Tokio-backed scheduler: one sleeping task per timer.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::{Scheduler, TimerHandle};

/// A [`Scheduler`] that delivers fired events through an unbounded mpsc
/// channel.
///
/// Must be used from within a Tokio runtime: `schedule` spawns a task.
pub struct TokioScheduler<E> {
    next_id: u64,
    fired: mpsc::UnboundedSender<E>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl<E: Send + 'static> TokioScheduler<E> {
    /// Creates a scheduler and the receiver its events arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<E>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 1,
            fired,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Drops bookkeeping for timers that already fired.
    fn prune(&mut self) {
        self.tasks.retain(|_, task| !task.is_finished());
    }
}

impl<E: Send + 'static> Scheduler<E> for TokioScheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        self.prune();

        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only when the server is shutting down.
            let _ = fired.send(event);
        });
        self.tasks.insert(handle, task);

        trace!(%handle, ?delay, "timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some(task) if !task.is_finished() => {
                task.abort();
                trace!(%handle, "timer cancelled");
                true
            }
            _ => false,
        }
    }

    fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl<E> Drop for TokioScheduler<E> {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
