use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable delayed task. Scheduling again before the delay elapses
/// drops the pending task and restarts the timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(pending) = self.slot().take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().map_or(false, |h| !h.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
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
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_trigger_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let runs = Arc::new(Mutex::new(Vec::new()));

        for query in ["r", "ru", "rus", "rust"] {
            let runs = runs.clone();
            debouncer.schedule(async move {
                runs.lock().unwrap().push(query);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(runs.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*runs.lock().unwrap(), vec!["rust"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let runs = Arc::new(Mutex::new(0));

        for _ in 0..2 {
            let runs = runs.clone();
            debouncer.schedule(async move {
                *runs.lock().unwrap() += 1;
            });
            tokio::time::sleep(Duration::from_millis(400)).await;
        }
        assert_eq!(*runs.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let runs = Arc::new(Mutex::new(0));

        let counter = runs.clone();
        debouncer.schedule(async move {
            *counter.lock().unwrap() += 1;
        });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*runs.lock().unwrap(), 0);
        assert!(!debouncer.is_pending());
    }
}
