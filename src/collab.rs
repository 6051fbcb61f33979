//! Collaborator contracts consumed by the coordinator.
//!
//! The coordinator treats all of these as opaque services with a
//! start/stop contract; their internals (protocol enable logic, persistent
//! storage, notification delivery) live outside this crate.

use std::sync::Arc;

use async_trait::async_trait;

use crate::completion::Completion;

/// State-change events delivered to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

/// The enable/disable plane of the subsystem.
///
/// `enable` and `disable` must eventually resolve the supplied token; the
/// resolution may arrive from any thread. The worker blocks on the token,
/// so a provider that never resolves stalls every subsequent transition.
pub trait EnableProvider: Send + Sync {
    /// Synchronous groundwork performed during initialize.
    fn init(&self) {}

    /// Trigger bring-up of the enable plane.
    fn enable(&self, done: Completion);

    /// Trigger tear-down of the enable plane.
    fn disable(&self, done: Completion);

    /// Return the underlying controller to a restartable state after a
    /// completed disable.
    fn reset(&self) {}

    /// Final teardown during cleanup.
    fn clean_up(&self) {}
}

/// Persistent configuration storage shared by both lifecycles.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Put the store into a stoppable state; part of shared bring-up.
    async fn start(&self);

    /// Stop the store; part of shared tear-down.
    async fn stop(&self);
}

/// Receives `On`/`Off` state-change events once a transition has settled.
pub trait NotificationSink: Send + Sync {
    fn state_changed(&self, state: PowerState);
}

/// Queued dependent work, drained once after each successful core start-up.
pub trait WorkQueue: Send + Sync {
    fn drain(&self);
}

/// A foundational module. Initialized during `initialize` in declaration
/// order and cleaned up during `clean_up` in reverse order.
pub trait FoundationModule: Send + Sync {
    fn init(&self);
    fn clean_up(&self);
}

/// The full set of collaborators wired into a coordinator at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub enable: Arc<dyn EnableProvider>,
    pub config_store: Arc<dyn ConfigStore>,
    pub sink: Arc<dyn NotificationSink>,
    pub work_queue: Arc<dyn WorkQueue>,
    pub foundation: Vec<Arc<dyn FoundationModule>>,
}
