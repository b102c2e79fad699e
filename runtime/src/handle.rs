//! Counting running effects.
//!
//! A counter is a `watch` channel over the number of effects still running.
//! Each spawned effect holds an [`EffectGuard`] for as long as it runs, so
//! the count drops even when the task is cancelled or panics.

use crate::error::StoreError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Clone, Debug)]
pub(crate) struct EffectCounter(Arc<watch::Sender<usize>>);

impl EffectCounter {
    pub(crate) fn new() -> Self {
        let (running, _) = watch::channel(0);
        Self(Arc::new(running))
    }

    /// Count one more running effect until the guard drops
    pub(crate) fn enter(&self) -> EffectGuard {
        self.0.send_modify(|running| *running += 1);
        EffectGuard(self.clone())
    }

    pub(crate) fn running(&self) -> usize {
        *self.0.borrow()
    }

    pub(crate) fn handle(&self) -> EffectHandle {
        EffectHandle {
            running: self.0.subscribe(),
        }
    }
}

pub(crate) struct EffectGuard(EffectCounter);

impl Drop for EffectGuard {
    fn drop(&mut self) {
        (self.0).0.send_modify(|running| *running = running.saturating_sub(1));
    }
}

/// Tracks the effects started by one [`Store::send`](crate::Store::send)
///
/// Actions those effects feed back into the store start effects of their
/// own, which this handle does not wait for.
///
/// ```ignore
/// let mut handle = store.send(Action::Refresh).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    running: watch::Receiver<usize>,
}

impl EffectHandle {
    /// A handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        let (_, running) = watch::channel(0);
        Self { running }
    }

    /// Effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.running.borrow()
    }

    /// Resolve once every tracked effect has finished
    pub async fn wait(&mut self) {
        // A closed channel means every guard is gone, so nothing is running.
        let _ = self.running.wait_for(|running| *running == 0).await;
    }

    /// [`wait`](Self::wait) with a deadline
    ///
    /// # Errors
    ///
    /// [`StoreError::Timeout`] if effects are still running at the deadline.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_count_up_and_down() {
        let counter = EffectCounter::new();
        let handle = counter.handle();

        let first = counter.enter();
        let second = counter.enter();
        assert_eq!(handle.pending(), 2);

        drop(first);
        assert_eq!(counter.running(), 1);
        drop(second);
        assert_eq!(handle.pending(), 0);
    }

    #[tokio::test]
    async fn wait_returns_when_last_guard_drops() {
        let counter = EffectCounter::new();
        let mut handle = counter.handle();
        let guard = counter.enter();

        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            drop(guard);
        });

        handle
            .wait_with_timeout(Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(handle.pending(), 0);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn wait_survives_dropped_counter() {
        let counter = EffectCounter::new();
        let mut handle = counter.handle();
        drop(counter);

        handle.wait().await;
    }
}
