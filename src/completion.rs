//! Single-resolution completion tokens.
//!
//! The worker hands a [`Completion`] to a collaborator before triggering an
//! asynchronous action, then blocks on the paired [`CompletionWait`] until
//! the collaborator resolves it. Resolution may arrive from any thread.

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::BringUpError;

/// Outcome carried by a completion token.
pub type CompletionResult = Result<(), BringUpError>;

/// Single-resolution completion token.
///
/// Resolving consumes the token, so it can fire at most once. Dropping an
/// unresolved token reports [`BringUpError::Abandoned`] to the waiter, so
/// the worker never hangs on a token a collaborator forgot about.
#[derive(Debug)]
pub struct Completion {
    tx: Option<oneshot::Sender<CompletionResult>>,
}

impl Completion {
    /// Create a token and the worker-side half that awaits it.
    pub(crate) fn new() -> (Self, CompletionWait) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, CompletionWait { rx })
    }

    /// Resolve with an explicit result.
    pub fn resolve(mut self, result: CompletionResult) {
        if let Some(tx) = self.tx.take() {
            // The waiter may have gone away; nothing to deliver then.
            let _ = tx.send(result);
        }
    }

    /// Resolve successfully.
    pub fn succeed(self) {
        self.resolve(Ok(()));
    }

    /// Resolve with a provider failure.
    pub fn fail(self, reason: impl Into<String>) {
        self.resolve(Err(BringUpError::Provider(reason.into())));
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            debug!("Completion::drop: token dropped unresolved");
            let _ = tx.send(Err(BringUpError::Abandoned));
        }
    }
}

/// Worker-side half of a completion pair.
#[derive(Debug)]
pub(crate) struct CompletionWait {
    rx: oneshot::Receiver<CompletionResult>,
}

impl CompletionWait {
    /// Block until the paired token resolves.
    pub(crate) async fn wait(self) -> CompletionResult {
        self.rx.await.unwrap_or(Err(BringUpError::Abandoned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_success() {
        let (done, wait) = Completion::new();
        done.succeed();
        assert_eq!(wait.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn test_resolve_failure() {
        let (done, wait) = Completion::new();
        done.fail("boom");
        assert_eq!(
            wait.wait().await,
            Err(BringUpError::Provider("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_dropped_token_reports_abandoned() {
        let (done, wait) = Completion::new();
        drop(done);
        assert_eq!(wait.wait().await, Err(BringUpError::Abandoned));
    }

    #[tokio::test]
    async fn test_resolution_from_foreign_thread() {
        let (done, wait) = Completion::new();
        std::thread::spawn(move || done.succeed());
        assert_eq!(wait.wait().await, Ok(()));
    }
}
