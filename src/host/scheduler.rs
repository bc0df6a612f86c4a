use std::sync::Arc;
use std::time::Duration;

use crate::types::{Ticks, UserId};

/// A unit of work handed to the host scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// The host's scheduler: every host-state mutation must run on the
/// context the host requires for it.
pub trait Scheduler: Send + Sync {
    /// Run `task` on the host's global context.
    fn run_global(&self, task: Task);

    /// Run `task` on `target`'s own context after `delay` ticks, or
    /// `on_unreachable` if the target is not connected. Reachability is
    /// checked when scheduling and, for delayed work, again when the
    /// delay elapses; exactly one of the two closures runs.
    fn run_for_user(&self, target: UserId, delay: Ticks, task: Task, on_unreachable: Task);
}

/// Answers whether a user is currently connected and schedulable.
pub trait Presence: Send + Sync {
    fn is_reachable(&self, target: UserId) -> bool;
}

/// Tokio-backed [`Scheduler`] mapping one tick to a fixed duration.
///
/// Zero-delay work runs inline on the calling task after the presence
/// check; delayed work is spawned onto the runtime. Must be used from
/// within a tokio runtime.
pub struct TickScheduler {
    presence: Arc<dyn Presence>,
    tick: Duration,
}

impl TickScheduler {
    /// One game tick.
    pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

    #[must_use]
    pub fn new(presence: Arc<dyn Presence>) -> Self {
        Self::with_tick(presence, Self::DEFAULT_TICK)
    }

    #[must_use]
    pub fn with_tick(presence: Arc<dyn Presence>, tick: Duration) -> Self {
        Self { presence, tick }
    }

    fn delay_of(&self, ticks: Ticks) -> Duration {
        self.tick
            .saturating_mul(u32::try_from(ticks.get()).unwrap_or(u32::MAX))
    }
}

impl Scheduler for TickScheduler {
    fn run_global(&self, task: Task) {
        tokio::spawn(async move { task() });
    }

    fn run_for_user(&self, target: UserId, delay: Ticks, task: Task, on_unreachable: Task) {
        if !self.presence.is_reachable(target) {
            on_unreachable();
            return;
        }
        if delay == Ticks::IMMEDIATE {
            task();
            return;
        }
        let wait = self.delay_of(delay);
        let presence = Arc::clone(&self.presence);
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if presence.is_reachable(target) {
                task();
            } else {
                on_unreachable();
            }
        });
    }
}
