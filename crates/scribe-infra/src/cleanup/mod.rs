//! Deferred purge of upload sessions.
//!
//! Every upload schedules a purge of its session after the retention window. Each
//! pending purge is keyed by session id and can be cancelled or run early.

use scribe_core::SessionId;
use scribe_storage::SessionStorage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct PendingPurge {
    generation: u64,
    token: CancellationToken,
}

#[derive(Clone)]
pub struct CleanupScheduler {
    storage: Arc<dyn SessionStorage>,
    retention: Duration,
    pending: Arc<Mutex<HashMap<SessionId, PendingPurge>>>,
    next_generation: Arc<AtomicU64>,
}

impl CleanupScheduler {
    pub fn new(storage: Arc<dyn SessionStorage>, retention: Duration) -> Self {
        Self {
            storage,
            retention,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, PendingPurge>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Purge `session` once the retention window has elapsed.
    ///
    /// Scheduling a session that is already pending restarts its timer.
    pub fn schedule(&self, session: SessionId) -> JoinHandle<()> {
        let token = CancellationToken::new();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        if let Some(previous) = self.lock().insert(
            session.clone(),
            PendingPurge {
                generation,
                token: token.clone(),
            },
        ) {
            previous.token.cancel();
        }

        tracing::debug!(
            session_id = %session,
            retention_secs = self.retention.as_secs(),
            "Cleanup scheduled"
        );

        let scheduler = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(session_id = %session, "Scheduled cleanup cancelled");
                }
                _ = tokio::time::sleep(scheduler.retention) => {
                    {
                        let mut pending = scheduler.lock();
                        if pending.get(&session).map(|p| p.generation) == Some(generation) {
                            pending.remove(&session);
                        }
                    }
                    scheduler.purge(&session).await;
                }
            }
        })
    }

    /// Cancel a pending purge. Returns whether one was pending.
    pub fn cancel(&self, session: &SessionId) -> bool {
        match self.lock().remove(session) {
            Some(entry) => {
                entry.token.cancel();
                tracing::info!(session_id = %session, "Cleanup cancelled");
                true
            }
            None => false,
        }
    }

    /// Sessions with a purge still waiting on its timer
    pub fn pending(&self) -> Vec<SessionId> {
        self.lock().keys().cloned().collect()
    }

    /// Cancel every timer and purge the affected sessions now.
    ///
    /// Called on graceful shutdown so no session outlives the process.
    pub async fn shutdown(&self) -> usize {
        let drained: Vec<(SessionId, PendingPurge)> = self.lock().drain().collect();
        let count = drained.len();

        for (session, entry) in drained {
            entry.token.cancel();
            self.purge(&session).await;
        }

        if count > 0 {
            tracing::info!(sessions = count, "Purged pending sessions on shutdown");
        }
        count
    }

    async fn purge(&self, session: &SessionId) {
        match self.storage.purge_session(session).await {
            Ok(()) => tracing::info!(session_id = %session, "Cleaned up session"),
            Err(e) => tracing::error!(session_id = %session, error = %e, "Session cleanup failed"),
        }
    }
}
