//! Copy status with timed auto-revert.
//!
//! `Idle --(copy ok)--> Copied --(2000 ms)--> Idle`. At most one reset is
//! outstanding: scheduling a new one cancels the previous token, and a reset
//! that already woke up checks the generation it was scheduled for before
//! writing. The reset task only holds a `Weak` on the state, so once the
//! tracker is gone the write is skipped.

use rin_docs_core::{CopyStatus, DocsError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Time a block stays in [`CopyStatus::Copied`] before reverting.
pub const REVERT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug)]
struct StatusCell {
    status: watch::Sender<CopyStatus>,
    generation: u64,
    pending: Option<CancellationToken>,
    disposed: bool,
}

impl StatusCell {
    fn set(&self, status: CopyStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

fn lock(cell: &Mutex<StatusCell>) -> MutexGuard<'_, StatusCell> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Component-local copy status, bound to the event loop it was created on.
#[derive(Debug)]
pub struct CopyStatusTracker {
    cell: Arc<Mutex<StatusCell>>,
    runtime: Handle,
}

impl CopyStatusTracker {
    /// Create an idle tracker on the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`DocsError::RuntimeUnavailable`] outside of a runtime.
    pub fn new() -> Result<Self> {
        let runtime =
            Handle::try_current().map_err(|e| DocsError::RuntimeUnavailable(e.to_string()))?;
        Ok(Self::with_runtime(runtime))
    }

    /// Create an idle tracker that schedules resets on `runtime`.
    #[must_use]
    pub fn with_runtime(runtime: Handle) -> Self {
        let (status, _) = watch::channel(CopyStatus::Idle);
        Self {
            cell: Arc::new(Mutex::new(StatusCell {
                status,
                generation: 0,
                pending: None,
                disposed: false,
            })),
            runtime,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> CopyStatus {
        *lock(&self.cell).status.borrow()
    }

    /// Receive every status change, for hosts that re-render on updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CopyStatus> {
        lock(&self.cell).status.subscribe()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        lock(&self.cell).disposed
    }

    /// Record a successful copy and (re)schedule the revert.
    pub fn mark_copied(&self) {
        let mut cell = lock(&self.cell);
        if cell.disposed {
            return;
        }

        cell.cancel_pending();
        cell.generation += 1;
        cell.set(CopyStatus::Copied);

        let token = CancellationToken::new();
        cell.pending = Some(token.clone());
        let generation = cell.generation;
        drop(cell);

        let deadline = Instant::now() + REVERT_DELAY;
        tracing::debug!(generation, "Copy status reset scheduled");
        self.runtime
            .spawn(revert_after(Arc::downgrade(&self.cell), generation, deadline, token));
    }

    /// Cancel any pending revert and stop accepting updates.
    pub fn dispose(&self) {
        let mut cell = lock(&self.cell);
        if cell.disposed {
            return;
        }
        cell.disposed = true;
        cell.cancel_pending();
        tracing::debug!("Copy status disposed");
    }
}

impl Drop for CopyStatusTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn revert_after(
    cell: Weak<Mutex<StatusCell>>,
    generation: u64,
    deadline: Instant,
    token: CancellationToken,
) {
    tokio::select! {
        () = token.cancelled() => {
            tracing::trace!(generation, "Copy status reset cancelled");
        }
        () = tokio::time::sleep_until(deadline) => {
            let Some(cell) = cell.upgrade() else {
                return;
            };
            let mut cell = lock(&cell);
            if cell.disposed || cell.generation != generation {
                return;
            }
            cell.pending = None;
            cell.set(CopyStatus::Idle);
            tracing::debug!(generation, "Copy status reset to idle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        settle().await;
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let err = CopyStatusTracker::new().unwrap_err();
        assert!(matches!(err, DocsError::RuntimeUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverts_after_delay() {
        let tracker = CopyStatusTracker::new().expect("runtime available");
        assert_eq!(tracker.status(), CopyStatus::Idle);

        tracker.mark_copied();
        assert_eq!(tracker.status(), CopyStatus::Copied);

        advance(REVERT_DELAY - Duration::from_millis(1)).await;
        assert_eq!(tracker.status(), CopyStatus::Copied);

        advance(Duration::from_millis(1)).await;
        assert_eq!(tracker.status(), CopyStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_copy_supersedes_pending_reset() {
        let tracker = CopyStatusTracker::new().expect("runtime available");
        let mut updates = tracker.subscribe();

        tracker.mark_copied();
        advance(Duration::from_millis(1500)).await;
        tracker.mark_copied();

        // The first reset would have fired here
        advance(Duration::from_secs(1)).await;
        assert_eq!(tracker.status(), CopyStatus::Copied);

        advance(Duration::from_secs(1)).await;
        assert_eq!(tracker.status(), CopyStatus::Idle);
        assert_eq!(*updates.borrow_and_update(), CopyStatus::Idle);

        advance(Duration::from_secs(10)).await;
        assert!(!updates.has_changed().expect("tracker alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_reset() {
        let tracker = CopyStatusTracker::new().expect("runtime available");
        tracker.mark_copied();
        tracker.dispose();
        assert!(tracker.is_disposed());

        advance(Duration::from_secs(5)).await;
        assert_eq!(tracker.status(), CopyStatus::Copied);

        tracker.mark_copied();
        tracker.dispose();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_with_pending_reset() {
        let tracker = CopyStatusTracker::new().expect("runtime available");
        let mut updates = tracker.subscribe();
        tracker.mark_copied();
        let _ = updates.borrow_and_update();
        drop(tracker);

        advance(Duration::from_secs(5)).await;
        assert!(updates.has_changed().is_err());
    }
}
