//! The lifecycle worker: owns all state and executes transitions in post
//! order, one at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use super::handle::CoordinatorHandle;
use super::messages::Command;
use crate::collab::{Collaborators, PowerState};
use crate::completion::{Completion, CompletionResult};
use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;
use crate::state::{Consumer, CoreState, LifecycleSnapshot, SharedResource};

/// Sequences bring-up and tear-down of the core subsystem and the optional
/// auxiliary consumer.
///
/// All lifecycle state is owned by the worker loop; callers interact
/// through a [`CoordinatorHandle`]. Create one coordinator per subsystem
/// and keep it for the life of the process (embedding systems typically
/// park the handle in a `OnceLock`). There is no explicit destruction
/// operation: the worker exits once every handle has been dropped.
pub struct Coordinator {
    tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<LifecycleSnapshot>,
    config: CoordinatorConfig,
    worker: Worker,
}

impl Coordinator {
    /// Create a coordinator wired to the given collaborators.
    pub fn new(config: CoordinatorConfig, collab: Collaborators) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_buffer);
        let (state_tx, state_rx) = watch::channel(LifecycleSnapshot::default());
        Self {
            tx,
            state_rx,
            config,
            worker: Worker {
                collab,
                rx,
                state_tx,
                state: LifecycleSnapshot::default(),
                shared: SharedResource::default(),
            },
        }
    }

    /// Handle for posting transitions and reading state.
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle::new(
            self.tx.clone(),
            self.state_rx.clone(),
            self.config.aux_enabled,
        )
    }

    /// Run the coordinator on a dedicated, named OS thread driving its own
    /// current-thread runtime.
    ///
    /// Thread or runtime construction failure is fatal for the feature and
    /// is returned to the embedding system rather than swallowed.
    pub fn spawn_thread(
        config: CoordinatorConfig,
        collab: Collaborators,
    ) -> Result<CoordinatorHandle, CoordinatorError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let coordinator = Self::new(config, collab);
        let handle = coordinator.handle();
        std::thread::Builder::new()
            .name(coordinator.config.worker_thread_name.clone())
            .spawn(move || runtime.block_on(coordinator.run()))?;
        Ok(handle)
    }

    /// Worker loop. Consumes the coordinator and runs until the last
    /// handle is dropped.
    pub async fn run(self) {
        // Keep no sender of our own, otherwise the queue never closes.
        // A `..` rest pattern would leave `tx` alive in the partially
        // moved `self` for the duration of the loop.
        let Self {
            worker,
            tx,
            state_rx,
            config: _,
        } = self;
        drop(tx);
        drop(state_rx);
        worker.run().await;
    }
}

/// The single execution context that mutates lifecycle state.
struct Worker {
    collab: Collaborators,
    rx: mpsc::Receiver<Command>,
    state_tx: watch::Sender<LifecycleSnapshot>,
    state: LifecycleSnapshot,
    shared: SharedResource,
}

impl Worker {
    async fn run(mut self) {
        info!("lifecycle coordinator started");
        while let Some(cmd) = self.rx.recv().await {
            // Ack guards travel with their command and drop (waking the
            // parked caller) when the arm finishes.
            match cmd {
                Command::Initialize { ack: _ack } => self.initialize(),
                Command::StartUp => self.start_up().await,
                Command::ShutDown => self.shut_down().await,
                Command::CleanUp { ack: _ack } => self.clean_up().await,
                Command::AuxStartUp => self.aux_start_up().await,
                Command::AuxShutDown => self.aux_shut_down().await,
                Command::Quiesce { ack: _ack } => {}
            }
        }
        info!("lifecycle coordinator stopped");
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state);
    }

    /// Synchronous initialization: foundation modules in declaration
    /// order, then the enable provider's groundwork.
    fn initialize(&mut self) {
        if self.state.is_initialized() {
            info!("initialize: core already initialized");
            return;
        }
        info!("initialize: initializing the core");
        for module in &self.collab.foundation {
            module.init();
        }
        self.collab.enable.init();
        self.state = LifecycleSnapshot {
            core: CoreState::Initialized,
            aux_running: false,
        };
        self.publish();
        info!("initialize: finished");
    }

    fn ensure_initialized(&mut self) {
        if !self.state.is_initialized() {
            warn!("core was uninitialized, initializing now");
            self.initialize();
        }
    }

    async fn start_up(&mut self) {
        if self.state.is_running() {
            info!("start_up: core already brought up");
            return;
        }
        self.ensure_initialized();

        info!("start_up: bringing up the core");
        let result = if self.shared.acquire(Consumer::Core) {
            self.shared_bring_up().await
        } else {
            debug!("start_up: shared infrastructure already live");
            Ok(())
        };

        if let Err(err) = result {
            error!(%err, "start_up: failed to bring up the core");
            // Mark running without publishing so the symmetric shutdown
            // path performs the full unwind; observers never see a
            // successful start.
            self.state.core = CoreState::Running;
            self.shut_down().await;
            return;
        }

        self.state.core = CoreState::Running;
        self.publish();

        // Off-worker round: drain dependent work, then announce the change.
        let work_queue = Arc::clone(&self.collab.work_queue);
        let sink = Arc::clone(&self.collab.sink);
        tokio::spawn(async move {
            work_queue.drain();
            sink.state_changed(PowerState::On);
        });
        info!("start_up: finished");
    }

    async fn shut_down(&mut self) {
        if !self.state.is_running() {
            info!("shut_down: core already brought down");
            return;
        }
        info!("shut_down: bringing down the core");
        // Cleared before the first await; worker serialization, not a
        // lock, prevents reentry.
        self.state.core = CoreState::Initialized;
        self.publish();

        if self.shared.release(Consumer::Core) {
            self.shared_tear_down().await;
        } else {
            debug!("shut_down: shared infrastructure stays up for the auxiliary consumer");
        }

        // Second round: the off notification is delivered outside the
        // worker and awaited before the shutdown counts as applied.
        let (done, wait) = Completion::new();
        let sink = Arc::clone(&self.collab.sink);
        tokio::spawn(async move {
            sink.state_changed(PowerState::Off);
            done.succeed();
        });
        let _ = wait.wait().await;
        info!("shut_down: finished");
    }

    async fn clean_up(&mut self) {
        if !self.state.is_initialized() {
            info!("clean_up: core already in a clean state");
            return;
        }
        if self.state.is_running() {
            warn!("clean_up: core still running, bringing it down first");
            self.shut_down().await;
        }
        if self.state.aux_running {
            warn!("clean_up: auxiliary consumer still running, bringing it down first");
            self.aux_shut_down().await;
        }

        info!("clean_up: cleaning up the core");
        self.collab.enable.clean_up();
        for module in self.collab.foundation.iter().rev() {
            module.clean_up();
        }
        self.state = LifecycleSnapshot::default();
        self.publish();
        info!("clean_up: finished");
    }

    async fn aux_start_up(&mut self) {
        if self.state.aux_running {
            info!("aux_start_up: auxiliary already brought up");
            return;
        }
        self.ensure_initialized();

        info!("aux_start_up: bringing up the auxiliary consumer");
        // Marked running up front so a failed bring-up rolls back through
        // the regular shutdown path.
        self.state.aux_running = true;
        self.publish();

        let result = if self.shared.acquire(Consumer::Aux) {
            self.shared_bring_up().await
        } else {
            debug!("aux_start_up: piggybacking on live shared infrastructure");
            Ok(())
        };

        if let Err(err) = result {
            error!(%err, "aux_start_up: failed to bring up the auxiliary consumer");
            self.aux_shut_down().await;
            return;
        }
        info!("aux_start_up: finished");
    }

    async fn aux_shut_down(&mut self) {
        if !self.state.aux_running {
            info!("aux_shut_down: auxiliary already brought down");
            return;
        }
        info!("aux_shut_down: bringing down the auxiliary consumer");
        self.state.aux_running = false;
        self.publish();

        if self.shared.release(Consumer::Aux) {
            self.shared_tear_down().await;
        } else {
            debug!("aux_shut_down: shared infrastructure stays up for the core");
        }
        info!("aux_shut_down: finished");
    }

    /// Shared infrastructure bring-up; runs only on the 0→1 edge of the
    /// shared-resource count.
    async fn shared_bring_up(&mut self) -> CompletionResult {
        self.collab.config_store.start().await;
        let (done, wait) = Completion::new();
        self.collab.enable.enable(done);
        wait.wait().await
    }

    /// Shared infrastructure tear-down; runs only on the 1→0 edge.
    async fn shared_tear_down(&mut self) {
        let (done, wait) = Completion::new();
        self.collab.enable.disable(done);
        self.collab.config_store.stop().await;
        if let Err(err) = wait.wait().await {
            warn!(%err, "disable completed with failure, continuing tear-down");
        }
        // Leaves the controller in a restartable state.
        self.collab.enable.reset();
    }
}
