//! Lifecycle state registers and the shared-resource reference count.
//!
//! All of these are owned and mutated exclusively by the worker; observers
//! see [`LifecycleSnapshot`] values published on a watch channel.

use serde::{Deserialize, Serialize};

/// Linear state of the core lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreState {
    /// Nothing has been set up; only `initialize` is meaningful.
    #[default]
    Uninitialized,
    /// Foundation and groundwork are in place; the core is not live.
    Initialized,
    /// The core is fully up.
    Running,
}

/// Point-in-time view of both lifecycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSnapshot {
    /// State of the core lifecycle.
    pub core: CoreState,
    /// Whether the auxiliary consumer is up.
    pub aux_running: bool,
}

impl LifecycleSnapshot {
    /// True once `initialize` has been applied and `clean_up` has not.
    pub fn is_initialized(&self) -> bool {
        self.core != CoreState::Uninitialized
    }

    /// True iff the most recent applied core transition was a successful
    /// start-up with no shut-down since.
    pub fn is_running(&self) -> bool {
        self.core == CoreState::Running
    }
}

/// Consumers of the shared enable/config infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Consumer {
    Core,
    Aux,
}

/// Two-consumer reference count over the shared infrastructure.
///
/// Bring-up belongs to whichever consumer observes the 0→1 edge and
/// tear-down to whichever observes the 1→0 edge, independent of the order
/// the consumers come and go.
#[derive(Debug, Default)]
pub(crate) struct SharedResource {
    core: bool,
    aux: bool,
}

impl SharedResource {
    fn slot(&mut self, consumer: Consumer) -> &mut bool {
        match consumer {
            Consumer::Core => &mut self.core,
            Consumer::Aux => &mut self.aux,
        }
    }

    /// Active consumer count; always 0, 1, or 2.
    pub(crate) fn count(&self) -> u8 {
        self.core as u8 + self.aux as u8
    }

    /// Mark `consumer` active. Returns true on the 0→1 edge, in which case
    /// the caller must perform shared bring-up.
    pub(crate) fn acquire(&mut self, consumer: Consumer) -> bool {
        let before = self.count();
        let slot = self.slot(consumer);
        debug_assert!(!*slot, "consumer acquired the shared resource twice");
        *slot = true;
        before == 0
    }

    /// Mark `consumer` inactive. Returns true on the 1→0 edge, in which
    /// case the caller must perform shared tear-down. Releasing a consumer
    /// that is not active is a no-op.
    pub(crate) fn release(&mut self, consumer: Consumer) -> bool {
        let slot = self.slot(consumer);
        if !*slot {
            return false;
        }
        *slot = false;
        self.count() == 0
    }
}
