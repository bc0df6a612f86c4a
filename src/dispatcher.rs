use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::Result;
use crate::content::ToastContent;
use crate::definition::CRITERION_NAME;
use crate::error::Error;
use crate::host::{AdvancementHost, Scheduler, Task};
use crate::registry::ToastRegistry;
use crate::types::{Ticks, UserId};

/// Delivers toasts: resolves the definition through the registry, grants
/// its criterion on the target's execution context, then schedules the
/// paired revoke one tick later so the same toast can fire again.
pub struct ToastService {
    registry: Arc<ToastRegistry>,
    host: Arc<dyn AdvancementHost>,
    scheduler: Arc<dyn Scheduler>,
}

impl ToastService {
    #[must_use]
    pub fn new(host: Arc<dyn AdvancementHost>, scheduler: Arc<dyn Scheduler>) -> Self {
        let registry = Arc::new(ToastRegistry::new(Arc::clone(&host)));
        Self::with_registry(registry, host, scheduler)
    }

    /// Build a service around an externally owned registry, e.g. one
    /// shared with another dispatcher over the same host.
    #[must_use]
    pub const fn with_registry(
        registry: Arc<ToastRegistry>,
        host: Arc<dyn AdvancementHost>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            registry,
            host,
            scheduler,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ToastRegistry> {
        &self.registry
    }

    /// Show `content` as a toast to `target`.
    ///
    /// Resolves once the grant has run on the target's context and the
    /// revoke is scheduled; the revoke itself fires one tick later,
    /// after this call has already returned, so a failure inside it is
    /// logged and dropped rather than surfaced. An unreachable target
    /// skips the whole sequence silently.
    ///
    /// # Errors
    ///
    /// [`Error::Registration`] if the host rejects a new definition;
    /// [`Error::DefinitionNotFound`] if the definition vanishes from
    /// the host between registration and grant (a desync bug, not a
    /// transient condition); [`Error::Host`] if the grant itself fails.
    pub async fn deliver(&self, content: &ToastContent, target: UserId) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel::<Result<()>>();
        // Exactly one of the two scheduled closures runs; both need the
        // sender, so it lives in a shared take-once slot.
        let slot = Arc::new(Mutex::new(Some(done_tx)));

        let registry = Arc::clone(&self.registry);
        let host = Arc::clone(&self.host);
        let scheduler = Arc::clone(&self.scheduler);
        let content = content.clone();
        let grant_slot = Arc::clone(&slot);
        let grant: Task = Box::new(move || {
            let outcome = grant_and_schedule_revoke(&registry, &host, &scheduler, &content, target);
            resolve(&grant_slot, outcome);
        });

        let skip: Task = Box::new(move || {
            debug!(target = %target, "toast target unreachable; delivery skipped");
            resolve(&slot, Ok(()));
        });

        self.scheduler
            .run_for_user(target, Ticks::IMMEDIATE, grant, skip);

        match done_rx.await {
            Ok(outcome) => outcome,
            // Scheduler dropped both closures without running either;
            // treat like an unreachable target.
            Err(_) => {
                debug!(target = %target, "scheduler dropped toast delivery");
                Ok(())
            }
        }
    }
}

/// Runs on the target's execution context.
fn grant_and_schedule_revoke(
    registry: &ToastRegistry,
    host: &Arc<dyn AdvancementHost>,
    scheduler: &Arc<dyn Scheduler>,
    content: &ToastContent,
    target: UserId,
) -> Result<()> {
    let registered = registry.ensure_registered(content)?;
    let Some(handle) = host.lookup(registered.id()) else {
        return Err(Error::DefinitionNotFound {
            id: registered.id().clone(),
        });
    };

    host.grant(handle, target, CRITERION_NAME)?;

    // The revoke resets progress so the next delivery of the same toast
    // re-triggers the popup. It fires after the caller is gone; errors
    // here can only be logged.
    let id = registered.id().clone();
    let revoke_host = Arc::clone(host);
    let revoke: Task = Box::new(move || {
        if let Err(err) = revoke_host.revoke(handle, target, CRITERION_NAME) {
            warn!(id = %id, target = %target, error = %err, "failed to revoke toast criterion");
        }
    });
    let skip: Task = Box::new(move || {
        debug!(target = %target, "target disconnected before revoke; skipped");
    });
    scheduler.run_for_user(target, Ticks::ONE, revoke, skip);
    Ok(())
}

fn resolve(slot: &Arc<Mutex<Option<oneshot::Sender<Result<()>>>>>, outcome: Result<()>) {
    let sender = match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    if let Some(sender) = sender {
        // The receiver only disappears if the caller stopped waiting.
        let _ = sender.send(outcome);
    }
}
