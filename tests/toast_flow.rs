#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use andjam::content::ToastContent;
use andjam::definition::{CRITERION_NAME, DefinitionPayload};
use andjam::dispatcher::ToastService;
use andjam::error::Error;
use andjam::host::{AdvancementHost, DefinitionHandle, Scheduler, Task};
use andjam::identity::ToastId;
use andjam::types::{FrameStyle, IconId, Ticks, UserId};
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq)]
enum HostCall {
    Register(String),
    Grant(DefinitionHandle, UserId, String),
    Revoke(DefinitionHandle, UserId, String),
}

/// In-memory stand-in for the host's advancement subsystem, recording
/// every call in order.
#[derive(Default)]
struct FakeHost {
    definitions: Mutex<HashMap<String, DefinitionHandle>>,
    calls: Mutex<Vec<HostCall>>,
    next_handle: AtomicU64,
    reject_registrations: AtomicBool,
    forget_registrations: AtomicBool,
}

impl FakeHost {
    fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn seed_definition(&self, id: &ToastId, handle: DefinitionHandle) {
        self.definitions
            .lock()
            .unwrap()
            .insert(id.as_str().to_string(), handle);
    }
}

impl AdvancementHost for FakeHost {
    fn register(&self, payload: &DefinitionPayload) -> andjam::Result<DefinitionHandle> {
        if self.reject_registrations.load(Ordering::SeqCst) {
            return Err(Error::Registration {
                key: payload.key.clone(),
                message: "malformed key".to_string(),
            });
        }
        let handle = DefinitionHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst));
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Register(payload.key.clone()));
        if !self.forget_registrations.load(Ordering::SeqCst) {
            self.definitions
                .lock()
                .unwrap()
                .insert(payload.key.clone(), handle);
        }
        Ok(handle)
    }

    fn lookup(&self, id: &ToastId) -> Option<DefinitionHandle> {
        self.definitions.lock().unwrap().get(id.as_str()).copied()
    }

    fn grant(&self, handle: DefinitionHandle, target: UserId, criterion: &str) -> andjam::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Grant(handle, target, criterion.to_string()));
        Ok(())
    }

    fn revoke(&self, handle: DefinitionHandle, target: UserId, criterion: &str) -> andjam::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Revoke(handle, target, criterion.to_string()));
        Ok(())
    }
}

/// Scheduler that runs everything inline, honoring a reachable-user set
/// and ignoring delays. Scheduling order is execution order, which is
/// what the ordering assertions below rely on.
#[derive(Default)]
struct InlineScheduler {
    reachable: Mutex<HashSet<UserId>>,
}

impl InlineScheduler {
    fn connect(&self, user: UserId) {
        self.reachable.lock().unwrap().insert(user);
    }
}

impl Scheduler for InlineScheduler {
    fn run_global(&self, task: Task) {
        task();
    }

    fn run_for_user(&self, target: UserId, _delay: Ticks, task: Task, on_unreachable: Task) {
        if self.reachable.lock().unwrap().contains(&target) {
            task();
        } else {
            on_unreachable();
        }
    }
}

struct Fixture {
    host: Arc<FakeHost>,
    scheduler: Arc<InlineScheduler>,
    service: ToastService,
}

fn fixture() -> Fixture {
    let host = Arc::new(FakeHost::default());
    let scheduler = Arc::new(InlineScheduler::default());
    let service = ToastService::new(
        Arc::clone(&host) as Arc<dyn AdvancementHost>,
        Arc::clone(&scheduler) as Arc<dyn Scheduler>,
    );
    Fixture {
        host,
        scheduler,
        service,
    }
}

fn user(name: &[u8]) -> UserId {
    UserId::new(Uuid::new_v3(&Uuid::NAMESPACE_OID, name))
}

fn hello_world() -> ToastContent {
    ToastContent::builder()
        .title("Hello")
        .description("World")
        .icon(IconId::new("stone"))
        .frame(FrameStyle::Task)
        .build()
}

#[tokio::test]
async fn deliver_registers_then_grants_then_revokes() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);

    let content = hello_world();
    fx.service.deliver(&content, target).await.unwrap();

    let id = ToastId::derive(&content);
    assert!(id.as_str().starts_with("andjam_toast/"));

    let calls = fx.host.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], HostCall::Register(id.as_str().to_string()));
    let HostCall::Grant(granted_handle, granted_to, ref criterion) = calls[1] else {
        panic!("expected a grant, got {:?}", calls[1]);
    };
    assert_eq!(granted_to, target);
    assert_eq!(criterion, CRITERION_NAME);
    assert_eq!(
        calls[2],
        HostCall::Revoke(granted_handle, target, CRITERION_NAME.to_string())
    );
}

#[tokio::test]
async fn repeat_delivery_reuses_the_cached_definition() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);

    let content = hello_world();
    fx.service.deliver(&content, target).await.unwrap();
    fx.service.deliver(&content, target).await.unwrap();

    let registrations = fx
        .host
        .calls()
        .iter()
        .filter(|call| matches!(call, HostCall::Register(_)))
        .count();
    assert_eq!(registrations, 1);

    // One grant/revoke pair per delivery.
    let grants: Vec<_> = fx
        .host
        .calls()
        .iter()
        .filter(|call| matches!(call, HostCall::Grant(..)))
        .cloned()
        .collect();
    assert_eq!(grants.len(), 2);
    assert_eq!(fx.host.calls().len(), 5);
}

#[tokio::test]
async fn unreachable_target_is_a_silent_noop() {
    let fx = fixture();
    let target = user(b"offline");

    let outcome = fx.service.deliver(&hello_world(), target).await;

    assert!(outcome.is_ok());
    assert!(fx.host.calls().is_empty());
}

#[tokio::test]
async fn same_text_with_different_icon_shares_one_definition() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);

    fx.service.deliver(&hello_world(), target).await.unwrap();
    let variant = ToastContent::builder()
        .title("Hello")
        .description("World")
        .icon(IconId::new("diamond"))
        .frame(FrameStyle::Challenge)
        .build();
    fx.service.deliver(&variant, target).await.unwrap();

    let registrations = fx
        .host
        .calls()
        .iter()
        .filter(|call| matches!(call, HostCall::Register(_)))
        .count();
    assert_eq!(registrations, 1);
}

#[tokio::test]
async fn definition_registered_by_a_previous_run_is_adopted() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);

    let content = hello_world();
    let handle = DefinitionHandle::new(7);
    fx.host.seed_definition(&ToastId::derive(&content), handle);

    fx.service.deliver(&content, target).await.unwrap();

    let calls = fx.host.calls();
    assert_eq!(
        calls,
        vec![
            HostCall::Grant(handle, target, CRITERION_NAME.to_string()),
            HostCall::Revoke(handle, target, CRITERION_NAME.to_string()),
        ]
    );
}

#[tokio::test]
async fn rejected_registration_surfaces_and_is_retried_later() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);
    fx.host.reject_registrations.store(true, Ordering::SeqCst);

    let err = fx.service.deliver(&hello_world(), target).await.unwrap_err();
    assert!(matches!(err, Error::Registration { .. }));
    assert!(fx.service.registry().is_empty());

    fx.host.reject_registrations.store(false, Ordering::SeqCst);
    fx.service.deliver(&hello_world(), target).await.unwrap();
    assert_eq!(fx.host.calls().len(), 3);
}

#[tokio::test]
async fn vanished_definition_is_a_desync_error() {
    let fx = fixture();
    let target = user(b"userA");
    fx.scheduler.connect(target);
    fx.host.forget_registrations.store(true, Ordering::SeqCst);

    let err = fx.service.deliver(&hello_world(), target).await.unwrap_err();

    assert!(matches!(err, Error::DefinitionNotFound { .. }));
    assert!(
        !fx.host
            .calls()
            .iter()
            .any(|call| matches!(call, HostCall::Grant(..)))
    );
}
