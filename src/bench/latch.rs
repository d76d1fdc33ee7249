use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts running workers down to zero.
///
/// Each worker holds a [`CompletionGuard`]; dropping it is the worker's
/// completion signal. The decrement is a release and [`CompletionLatch::wait`]
/// observes zero with an acquire, so everything a worker wrote before its
/// guard dropped is visible to the waiter afterwards.
#[derive(Debug, Default)]
pub struct CompletionLatch {
    remaining: AtomicUsize,
    notify: Notify,
}

impl CompletionLatch {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn register(self: &Arc<Self>) -> CompletionGuard {
        self.remaining.fetch_add(1, Ordering::AcqRel);
        CompletionGuard {
            latch: Arc::clone(self),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn release(&self) {
        let previous =
            self.remaining
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                    current.checked_sub(1)
                });
        if previous == Ok(1) {
            self.notify.notify_waiters();
        }
    }
}

/// Held by a running worker; dropping it counts the worker as finished.
#[derive(Debug)]
pub struct CompletionGuard {
    latch: Arc<CompletionLatch>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.latch.release();
    }
}
