//! Commands queued to the lifecycle worker.

use std::sync::Arc;

use tokio::sync::Semaphore;

/// Scoped acknowledgement for blocking operations.
///
/// The handle posts a command carrying one of these and parks on the
/// semaphore; the guard releases exactly one permit when dropped, so every
/// handler exit path (no-op, error, success) wakes the caller exactly once.
#[derive(Debug)]
pub(crate) struct AckGuard {
    sem: Arc<Semaphore>,
}

impl AckGuard {
    pub(crate) fn new(sem: Arc<Semaphore>) -> Self {
        Self { sem }
    }
}

impl Drop for AckGuard {
    fn drop(&mut self) {
        self.sem.add_permits(1);
    }
}

/// Lifecycle transitions, executed by the worker strictly in post order.
#[derive(Debug)]
pub(crate) enum Command {
    /// Blocking, idempotent initialization of the core.
    Initialize { ack: AckGuard },
    /// Fire-and-forget core bring-up.
    StartUp,
    /// Fire-and-forget core tear-down.
    ShutDown,
    /// Blocking teardown back to the uninitialized state.
    CleanUp { ack: AckGuard },
    /// Fire-and-forget auxiliary bring-up.
    AuxStartUp,
    /// Fire-and-forget auxiliary tear-down.
    AuxShutDown,
    /// Barrier: acknowledged once every previously posted command has run.
    Quiesce { ack: AckGuard },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ack_guard_releases_one_permit_on_drop() {
        let sem = Arc::new(Semaphore::new(0));
        let guard = AckGuard::new(Arc::clone(&sem));
        assert_eq!(sem.available_permits(), 0);
        drop(guard);
        assert_eq!(sem.available_permits(), 1);
        assert!(sem.try_acquire().is_ok());
    }
}
