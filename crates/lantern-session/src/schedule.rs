//! Deferred work: render continuations and delayed navigation.
//!
//! Work is expressed as a [`Wakeup`] value delivered back to the controller
//! after a delay. [`TokioScheduler`] uses real timers; [`ManualScheduler`]
//! queues wakeups for hosts that run their own loop, and for tests.

use std::{cell::RefCell, collections::VecDeque, time::Duration};

use tokio::{sync::mpsc, time::sleep};
use tokio_util::task::TaskTracker;
use tracing::trace;

use crate::render::RenderBatch;

/// Work to resume after a delay.
#[derive(Debug, Clone)]
pub enum Wakeup {
    /// Render the next batch of a result list.
    RenderBatch(RenderBatch),
    /// Navigate to an activated result.
    Navigate {
        /// Destination URL.
        url: String,
    },
}

/// Defers a wakeup.
pub trait Scheduler {
    /// Delivers `wakeup` after `delay`.
    fn schedule_after(&self, delay: Duration, wakeup: Wakeup);
}

impl<T: Scheduler + ?Sized> Scheduler for &T {
    fn schedule_after(&self, delay: Duration, wakeup: Wakeup) {
        (**self).schedule_after(delay, wakeup);
    }
}

/// Timer-backed scheduler delivering wakeups on a channel.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    /// Where fired wakeups are sent.
    tx: mpsc::UnboundedSender<Wakeup>,
    /// Tracks pending timers so shutdown can wait for them.
    tracker: TaskTracker,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its wakeups arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Wakeup>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            tracker: TaskTracker::new(),
        };
        (scheduler, rx)
    }

    /// Number of timers that have not fired yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, wakeup: Wakeup) {
        let tx = self.tx.clone();
        self.tracker.spawn(async move {
            sleep(delay).await;
            if tx.send(wakeup).is_err() {
                trace!("wakeup dropped; receiver closed");
            }
        });
    }
}

/// Scheduler that queues wakeups until the host asks for them.
///
/// Delays are recorded but not waited on.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    /// Queued wakeups in scheduling order.
    queue: RefCell<VecDeque<(Duration, Wakeup)>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest queued wakeup.
    pub fn next_wakeup(&self) -> Option<(Duration, Wakeup)> {
        self.queue.borrow_mut().pop_front()
    }

    /// Number of queued wakeups.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, wakeup: Wakeup) {
        self.queue.borrow_mut().push_back((delay, wakeup));
    }
}
