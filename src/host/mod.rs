//! Boundary traits for the embedding host.
//!
//! The core never talks to a concrete host: it registers, looks up,
//! grants and revokes through [`AdvancementHost`], and switches onto the
//! host's execution contexts through [`Scheduler`]. Embedders implement
//! both over whatever plugin API they actually run inside; swapping the
//! advancement trick for a native popup primitive only means writing a
//! different [`AdvancementHost`].

mod scheduler;

pub use scheduler::{Presence, Scheduler, Task, TickScheduler};

use crate::Result;
use crate::definition::DefinitionPayload;
use crate::identity::ToastId;
use crate::types::UserId;

/// Opaque token the host returns for a registered definition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DefinitionHandle(u64);

impl DefinitionHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The host's achievement-like subsystem.
///
/// All methods are called on a host execution context obtained through
/// [`Scheduler`]; implementations do not need their own synchronization
/// beyond what the host already requires.
pub trait AdvancementHost: Send + Sync {
    /// Install a new definition under `payload.key`.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Registration`] if the host rejects the
    /// definition (malformed key, unknown icon symbol, ...).
    fn register(&self, payload: &DefinitionPayload) -> Result<DefinitionHandle>;

    /// Find a live definition under `id`, including ones registered by
    /// a previous process run.
    fn lookup(&self, id: &ToastId) -> Option<DefinitionHandle>;

    /// Mark `criterion` complete for `target`. The host shows the toast
    /// popup on the resulting 0→100% transition.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Host`] on host-side failure.
    fn grant(&self, handle: DefinitionHandle, target: UserId, criterion: &str) -> Result<()>;

    /// Reset `criterion` for `target` so the next grant transitions
    /// from zero again. Must be a safe no-op for a user who has since
    /// disconnected.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Host`] on host-side failure.
    fn revoke(&self, handle: DefinitionHandle, target: UserId, criterion: &str) -> Result<()>;
}
