//! # subsys
//!
//! In-process lifecycle coordination for a subsystem core and an optional
//! auxiliary consumer that shares the same underlying infrastructure.
//!
//! A single worker owns all lifecycle state and executes every transition
//! strictly in the order it was posted, so transitions never overlap and
//! no caller ever observes a half-applied state. Callers choose between
//! blocking semantics (`initialize`, `cleanup`, `quiesce` park until the
//! worker acknowledges) and fire-and-forget semantics (`start`,
//! `shutdown`, and the auxiliary pair return as soon as the transition is
//! queued, with the outcome observable through state accessors and the
//! notification sink).
//!
//! The infrastructure shared by the two lifecycles (the config store and
//! the enable plane) is reference counted: whichever consumer activates
//! first performs shared bring-up, whichever deactivates last performs
//! shared tear-down, independent of order. A failed core bring-up triggers
//! exactly one compensating shutdown; there are no retries.
//!
//! # Modules
//!
//! - [`coordinator`] - the worker, its cloneable handle, and queued commands
//! - [`collab`] - collaborator contracts (enable plane, config store, sink, ...)
//! - [`completion`] - single-resolution completion tokens
//! - [`state`] - lifecycle state snapshots
//! - [`config`] - coordinator configuration
//! - [`error`] - typed errors
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use subsys::{
//!     Collaborators, Completion, ConfigStore, Coordinator, CoordinatorConfig,
//!     EnableProvider, NotificationSink, PowerState, WorkQueue,
//! };
//!
//! struct Plane;
//! impl EnableProvider for Plane {
//!     fn enable(&self, done: Completion) {
//!         done.succeed();
//!     }
//!     fn disable(&self, done: Completion) {
//!         done.succeed();
//!     }
//! }
//!
//! struct Store;
//! #[async_trait::async_trait]
//! impl ConfigStore for Store {
//!     async fn start(&self) {}
//!     async fn stop(&self) {}
//! }
//!
//! struct Sink;
//! impl NotificationSink for Sink {
//!     fn state_changed(&self, _state: PowerState) {}
//! }
//!
//! struct Queue;
//! impl WorkQueue for Queue {
//!     fn drain(&self) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collaborators = Collaborators {
//!         enable: Arc::new(Plane),
//!         config_store: Arc::new(Store),
//!         sink: Arc::new(Sink),
//!         work_queue: Arc::new(Queue),
//!         foundation: Vec::new(),
//!     };
//!
//!     let coordinator = Coordinator::new(CoordinatorConfig::default(), collaborators);
//!     let handle = coordinator.handle();
//!     tokio::spawn(coordinator.run());
//!
//!     handle.initialize().await?;
//!     handle.start().await?;
//!     handle.quiesce().await?;
//!     assert!(handle.is_running());
//!
//!     handle.cleanup().await?;
//!     assert!(!handle.is_initialized());
//!     Ok(())
//! }
//! ```

pub mod collab;
pub mod completion;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use collab::{
    Collaborators, ConfigStore, EnableProvider, FoundationModule, NotificationSink, PowerState,
    WorkQueue,
};
pub use completion::{Completion, CompletionResult};
pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorHandle};
pub use error::{BringUpError, CoordinatorError};
pub use state::{CoreState, LifecycleSnapshot};
