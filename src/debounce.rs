//! Cancellable delay timer for coalescing bursts of search keystrokes.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;

/// Quiet period a search waits for before its fetch is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle to a scheduled timer. Cancelling is idempotent; a timer whose
/// callback already ran ignores the cancel.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    inner: AbortHandle,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.inner.abort();
    }

    /// True once the callback has run or the timer was cancelled.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Delays a task until a quiet period has elapsed. Scheduling a new task
/// cancels the pending one, so at most one task per burst ever runs.
///
/// The pending timer is cancelled on drop; a torn-down owner never has a
/// callback fire after it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm the timer: run `task` after the configured delay, unless a
    /// newer schedule or a cancel supersedes it first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F) -> TimerHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        let join = tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        });
        let handle = TimerHandle {
            inner: join.abort_handle(),
        };
        self.pending = Some(handle.clone());
        handle
    }

    /// Cancel the pending timer, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        let handle = debouncer.schedule(counter_task(&counter));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_cancels_pending() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(counter_task(&counter));
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Superseded before its delay elapsed; only the second runs
        debouncer.schedule(counter_task(&counter));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        let handle = debouncer.schedule(counter_task(&counter));
        handle.cancel();
        handle.cancel();
        debouncer.cancel();
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let counter = Arc::new(AtomicUsize::new(0));

        {
            let mut debouncer = Debouncer::new(Duration::from_millis(300));
            debouncer.schedule(counter_task(&counter));
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_harmless() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        let handle = debouncer.schedule(counter_task(&counter));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        handle.cancel();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
