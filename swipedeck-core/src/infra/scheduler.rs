//! Scheduling primitives for the session event loop
//!
//! Everything that completes later (the long-press timer, the post-swipe
//! advance, the aggregation pipeline) is turned into a message delivered
//! back to the single loop that owns the session. Timers hand out a
//! [`TaskHandle`] so the owner can cancel them explicitly.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Posts messages into the owning event loop, now or after a delay.
#[derive(Debug)]
pub struct Scheduler<M> {
    tx: mpsc::UnboundedSender<M>,
}

impl<M> Clone for Scheduler<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M: Send + 'static> Scheduler<M> {
    /// Create a scheduler and the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<M>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a message for the next turn of the loop.
    pub fn post(&self, msg: M) {
        if self.tx.send(msg).is_err() {
            log::debug!("[Scheduler] Event loop closed; dropping message");
        }
    }

    /// Deliver `msg` after `delay` unless the returned handle is cancelled
    /// first.
    pub fn schedule(&self, delay: Duration, msg: M) -> TaskHandle {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(msg);
        });
        TaskHandle {
            abort: handle.abort_handle(),
        }
    }

    /// Run `fut` off the loop and deliver its output as a message.
    pub fn perform<F>(&self, fut: F) -> TaskHandle
    where
        F: Future<Output = M> + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let msg = fut.await;
            let _ = tx.send(msg);
        });
        TaskHandle {
            abort: handle.abort_handle(),
        }
    }
}

/// Cancellable handle to a scheduled message.
///
/// Dropping the handle does not cancel the task; call [`TaskHandle::cancel`].
#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    pub fn cancel(self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}
