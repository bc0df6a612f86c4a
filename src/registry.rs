use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::Result;
use crate::content::ToastContent;
use crate::definition::DefinitionPayload;
use crate::host::{AdvancementHost, DefinitionHandle};
use crate::identity::ToastId;

/// A toast definition installed into the host, plus the content it was
/// built from. Immutable once cached; lives for the process lifetime.
#[derive(Debug)]
pub struct RegisteredToast {
    id: ToastId,
    handle: DefinitionHandle,
    content: ToastContent,
}

impl RegisteredToast {
    #[must_use]
    pub const fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub const fn handle(&self) -> DefinitionHandle {
        self.handle
    }

    #[must_use]
    pub const fn content(&self) -> &ToastContent {
        &self.content
    }
}

/// Process-wide cache of toast definitions, keyed by [`ToastId`].
///
/// Guarantees at most one host registration per identifier: the cache
/// check, the host-side lookup and the registration all happen under a
/// single lock, so concurrent requests for the same new content cannot
/// race each other into duplicate definitions. Entries are never
/// evicted; the set of distinct toasts an embedder authors bounds the
/// cache.
pub struct ToastRegistry {
    host: Arc<dyn AdvancementHost>,
    cache: Mutex<HashMap<ToastId, Arc<RegisteredToast>>>,
}

impl ToastRegistry {
    #[must_use]
    pub fn new(host: Arc<dyn AdvancementHost>) -> Self {
        Self {
            host,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the definition for `content`, registering it with the
    /// host on first use.
    ///
    /// Resolution order: local cache, then a host-side lookup (a prior
    /// process run may have registered the definition persistently),
    /// then a fresh registration. Nothing is cached when registration
    /// fails, so a later call may retry.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Registration`] if the host rejects the
    /// new definition.
    pub fn ensure_registered(&self, content: &ToastContent) -> Result<Arc<RegisteredToast>> {
        let id = ToastId::derive(content);
        let mut cache = self.lock_cache();

        if let Some(existing) = cache.get(&id) {
            debug!(id = %id, "toast definition cache hit");
            return Ok(Arc::clone(existing));
        }

        let handle = if let Some(handle) = self.host.lookup(&id) {
            debug!(id = %id, "adopted definition already present on host");
            handle
        } else {
            let payload = DefinitionPayload::for_toast(&id, content);
            let handle = self.host.register(&payload)?;
            info!(id = %id, "registered toast definition");
            handle
        };

        let entry = Arc::new(RegisteredToast {
            id: id.clone(),
            handle,
            content: content.clone(),
        });
        cache.insert(id, Arc::clone(&entry));
        Ok(entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_cache().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_cache().is_empty()
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<ToastId, Arc<RegisteredToast>>> {
        // A panic while holding the lock leaves the map structurally
        // intact, so a poisoned guard is still usable.
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
