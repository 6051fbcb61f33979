//! Error types for the lifecycle coordinator.

use std::io;

use thiserror::Error;

/// Errors surfaced by the coordinator and its handle.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The dedicated worker could not be created. The feature is
    /// permanently inert; the embedding system must treat this as a hard
    /// initialization failure.
    #[error("failed to spawn lifecycle worker: {0}")]
    WorkerSpawn(#[from] io::Error),

    /// The worker is gone; no further transitions can be posted.
    #[error("coordinator worker is gone")]
    ChannelClosed,

    /// The auxiliary lifecycle capability was not enabled at construction.
    #[error("auxiliary lifecycle is not enabled")]
    AuxDisabled,
}

/// Failure delivered through a [`Completion`](crate::completion::Completion)
/// token. Bring-up and tear-down outcomes travel as completion results,
/// never as panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BringUpError {
    /// The collaborator resolved the token with a failure.
    #[error("collaborator reported failure: {0}")]
    Provider(String),

    /// The collaborator dropped the token without resolving it.
    #[error("completion token dropped before resolution")]
    Abandoned,
}
