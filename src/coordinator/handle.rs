//! Public interface to the lifecycle worker.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc, watch};
use tracing::debug;

use super::messages::{AckGuard, Command};
use crate::error::CoordinatorError;
use crate::state::LifecycleSnapshot;

/// Cloneable handle to a running [`Coordinator`](super::Coordinator).
///
/// Every method may be called from any thread or runtime. Blocking
/// operations (`initialize`, `cleanup`, `quiesce`) must not be invoked
/// from code already running on the worker, such as a collaborator
/// callback, because the worker would then wait on its own queue.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<Command>,
    state: watch::Receiver<LifecycleSnapshot>,
    aux_enabled: bool,
}

impl CoordinatorHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<Command>,
        state: watch::Receiver<LifecycleSnapshot>,
        aux_enabled: bool,
    ) -> Self {
        Self {
            tx,
            state,
            aux_enabled,
        }
    }

    async fn post(&self, cmd: Command) -> Result<(), CoordinatorError> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| CoordinatorError::ChannelClosed)
    }

    /// Post a command carrying an ack guard and park until the worker
    /// drops the guard.
    async fn post_and_wait(
        &self,
        make: impl FnOnce(AckGuard) -> Command,
    ) -> Result<(), CoordinatorError> {
        let sem = Arc::new(Semaphore::new(0));
        self.post(make(AckGuard::new(Arc::clone(&sem)))).await?;
        let _permit = sem
            .acquire()
            .await
            .map_err(|_| CoordinatorError::ChannelClosed)?;
        Ok(())
    }

    /// Bring the core to the initialized state. Blocks until applied;
    /// idempotent.
    pub async fn initialize(&self) -> Result<(), CoordinatorError> {
        debug!("CoordinatorHandle::initialize: called");
        self.post_and_wait(|ack| Command::Initialize { ack }).await
    }

    /// Request core bring-up. Returns once the transition is queued; the
    /// outcome is observable via [`is_running`](Self::is_running) and the
    /// notification sink.
    ///
    /// The drain/`On` notification round runs on a detached task. If the
    /// worker's runtime shuts down right after a successful start (for
    /// example the last handle drops immediately), that round may never
    /// run; callers that need it delivered must keep the coordinator (and
    /// its runtime) alive until the sink observes the change.
    pub async fn start(&self) -> Result<(), CoordinatorError> {
        debug!("CoordinatorHandle::start: called");
        self.post(Command::StartUp).await
    }

    /// Request core tear-down. Returns once the transition is queued.
    pub async fn shutdown(&self) -> Result<(), CoordinatorError> {
        debug!("CoordinatorHandle::shutdown: called");
        self.post(Command::ShutDown).await
    }

    /// Tear everything down to the uninitialized state. Blocks until
    /// applied; forces a core (and auxiliary) shutdown first if needed.
    pub async fn cleanup(&self) -> Result<(), CoordinatorError> {
        debug!("CoordinatorHandle::cleanup: called");
        self.post_and_wait(|ack| Command::CleanUp { ack }).await
    }

    /// Block until every transition posted before this call has been
    /// applied.
    pub async fn quiesce(&self) -> Result<(), CoordinatorError> {
        debug!("CoordinatorHandle::quiesce: called");
        self.post_and_wait(|ack| Command::Quiesce { ack }).await
    }

    /// Request auxiliary bring-up. Returns once the transition is queued;
    /// fails immediately if the capability is disabled.
    pub async fn aux_start(&self) -> Result<(), CoordinatorError> {
        if !self.aux_enabled {
            return Err(CoordinatorError::AuxDisabled);
        }
        debug!("CoordinatorHandle::aux_start: called");
        self.post(Command::AuxStartUp).await
    }

    /// Request auxiliary tear-down. Returns once the transition is queued;
    /// fails immediately if the capability is disabled.
    pub async fn aux_shutdown(&self) -> Result<(), CoordinatorError> {
        if !self.aux_enabled {
            return Err(CoordinatorError::AuxDisabled);
        }
        debug!("CoordinatorHandle::aux_shutdown: called");
        self.post(Command::AuxShutDown).await
    }

    /// Whether the core has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.state.borrow().is_initialized()
    }

    /// Whether the core is fully up.
    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Whether the auxiliary consumer is up.
    pub fn is_aux_running(&self) -> bool {
        self.state.borrow().aux_running
    }

    /// Point-in-time view of both lifecycles.
    pub fn state(&self) -> LifecycleSnapshot {
        *self.state.borrow()
    }

    /// Whether the auxiliary capability was enabled at construction.
    pub fn aux_enabled(&self) -> bool {
        self.aux_enabled
    }
}
