//! Integration test common infrastructure.
//!
//! Provides configurable mediator, proxy and command fixtures plus a shared
//! `Data` probe that records what the framework did to them.

#![allow(dead_code)]

use multicore_mvc::{
    CommandFactory, HandlerResult, Mediator, MediatorBase, Notification, Notifier, Notify, Proxy,
    ProxyBase, SimpleCommand,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Observable side effects of a fixture.
#[derive(Default)]
pub struct Data {
    pub counter: AtomicUsize,
    pub on_register_called: AtomicBool,
    pub on_remove_called: AtomicBool,
    pub received: Mutex<Vec<String>>,
}

impl Data {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }

    pub fn reset(&self) {
        self.counter.store(0, Ordering::SeqCst);
        self.received.lock().clear();
    }
}

// ============================================================================
// Mediator fixture
// ============================================================================

/// A mediator whose interests and reaction are chosen per test.
pub struct TestMediator {
    base: MediatorBase,
    interests: RwLock<Vec<String>>,
    data: Arc<Data>,
    remove_self: bool,
}

impl TestMediator {
    pub fn new(name: &str, interests: &[&str], data: &Arc<Data>) -> Arc<Self> {
        Arc::new(Self::build(name, interests, data, false))
    }

    /// Removes itself from its core on every notification it handles.
    pub fn self_removing(name: &str, interests: &[&str], data: &Arc<Data>) -> Arc<Self> {
        Arc::new(Self::build(name, interests, data, true))
    }

    fn build(name: &str, interests: &[&str], data: &Arc<Data>, remove_self: bool) -> Self {
        Self {
            base: MediatorBase::new(Some(name), Some(data.clone())),
            interests: RwLock::new(interests.iter().map(|s| s.to_string()).collect()),
            data: data.clone(),
            remove_self,
        }
    }

    pub fn set_interests(&self, interests: &[&str]) {
        *self.interests.write() = interests.iter().map(|s| s.to_string()).collect();
    }
}

impl Notify for TestMediator {
    fn notifier(&self) -> &Notifier {
        self.base.notifier()
    }
}

impl Mediator for TestMediator {
    fn base(&self) -> &MediatorBase {
        &self.base
    }

    fn notification_interests(&self) -> Vec<String> {
        self.interests.read().clone()
    }

    fn handle_notification(&self, notification: &Notification) -> HandlerResult {
        self.data.counter.fetch_add(1, Ordering::SeqCst);
        self.data
            .received
            .lock()
            .push(notification.name().to_string());
        if self.remove_self {
            self.facade()?.remove_mediator(self.name());
        }
        Ok(())
    }

    fn on_register(&self) {
        self.data.on_register_called.store(true, Ordering::SeqCst);
    }

    fn on_remove(&self) {
        self.data.on_remove_called.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Proxy fixture
// ============================================================================

/// A proxy recording its lifecycle hooks into a `Data` probe.
pub struct TestProxy {
    base: ProxyBase,
    data: Arc<Data>,
}

impl TestProxy {
    pub fn new(name: &str, data: &Arc<Data>) -> Arc<Self> {
        Arc::new(Self {
            base: ProxyBase::new(Some(name), None),
            data: data.clone(),
        })
    }
}

impl Notify for TestProxy {
    fn notifier(&self) -> &Notifier {
        self.base.notifier()
    }
}

impl Proxy for TestProxy {
    fn base(&self) -> &ProxyBase {
        &self.base
    }

    fn on_register(&self) {
        self.data.on_register_called.store(true, Ordering::SeqCst);
    }

    fn on_remove(&self) {
        self.data.on_remove_called.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Command fixtures
// ============================================================================

/// Value object passed as notification body to arithmetic commands.
pub struct TestVo {
    pub input: i64,
    pub result: Mutex<i64>,
    pub result2: Mutex<i64>,
}

impl TestVo {
    pub fn new(input: i64) -> Arc<Self> {
        Arc::new(Self {
            input,
            result: Mutex::new(0),
            result2: Mutex::new(0),
        })
    }

    pub fn result(&self) -> i64 {
        *self.result.lock()
    }

    pub fn result2(&self) -> i64 {
        *self.result2.lock()
    }
}

/// The `TestVo` carried by `note`, whether it was attached with
/// `with_body(Arc<TestVo>)` or sent directly as a payload.
pub fn vo_of(note: &Notification) -> Arc<TestVo> {
    if let Some(vo) = note.body_as::<Arc<TestVo>>() {
        return vo.clone();
    }
    note.body()
        .cloned()
        .and_then(|body| body.downcast::<TestVo>().ok())
        .expect("TestVo body")
}

/// Adds `2 * input` to `result`, so a double execution is visible.
pub fn doubling_command() -> CommandFactory {
    SimpleCommand::factory(|_, note| {
        let vo = vo_of(note);
        *vo.result.lock() += 2 * vo.input;
        Ok(())
    })
}

/// Sets `result2 = input * input`.
pub fn squaring_command() -> CommandFactory {
    SimpleCommand::factory(|_, note| {
        let vo = vo_of(note);
        *vo.result2.lock() = vo.input * vo.input;
        Ok(())
    })
}

/// Sets `result = 2 * input` (no accumulation).
pub fn setting_double_command() -> CommandFactory {
    SimpleCommand::factory(|_, note| {
        let vo = vo_of(note);
        *vo.result.lock() = 2 * vo.input;
        Ok(())
    })
}
