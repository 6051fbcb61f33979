//! Lifecycle coordinator: the worker, its public handle, and the queued
//! commands between them.

mod core;
mod handle;
mod messages;

pub use core::Coordinator;
pub use handle::CoordinatorHandle;
