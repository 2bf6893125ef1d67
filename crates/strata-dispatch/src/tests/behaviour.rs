//! Behaviour-driven tests for opening structured directories.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use strata_plugins::test_support::StubPlugin;
use strata_plugins::{PluginRegistry, SessionContext};

use super::support::{
    FakeConnector, ScriptedProxy, TestService, build_service, capture_logs, request_for,
};
use crate::locality::{HostClassification, PeerHost};

struct TestWorld {
    classification: HostClassification,
    registry: PluginRegistry,
    plugins: Vec<Arc<StubPlugin>>,
    connector: Option<FakeConnector>,
    proxy: Option<ScriptedProxy>,
    service: Option<TestService>,
    session: Arc<SessionContext>,
    statuses: Vec<i32>,
    logs: String,
}

impl TestWorld {
    fn new() -> Self {
        Self {
            classification: HostClassification::Local,
            registry: PluginRegistry::new(),
            plugins: Vec::new(),
            connector: None,
            proxy: None,
            service: None,
            session: Arc::new(SessionContext::new(21, "rods")),
            statuses: Vec::new(),
            logs: String::new(),
        }
    }

    fn service(&mut self) -> &TestService {
        if self.service.is_none() {
            let built = build_service(
                self.classification.clone(),
                std::mem::take(&mut self.registry),
                self.connector.take().unwrap_or_default(),
                self.proxy.take().unwrap_or(ScriptedProxy::Fixed(0)),
            );
            self.service = Some(built);
        }
        self.service.as_ref().expect("service built")
    }

    fn open(&mut self, path: &str) {
        let request = request_for("tar", path, Arc::clone(&self.session));
        let service = self.service();
        let (status, logs) = capture_logs(|| service.open_structured_directory_status(&request));
        self.statuses.push(status);
        self.logs.push_str(&logs);
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

#[given("the container's host resolves locally")]
fn given_local(world: &RefCell<TestWorld>) {
    world.borrow_mut().classification = HostClassification::Local;
}

#[given("the container's host resolves to peer {name}")]
fn given_peer(world: &RefCell<TestWorld>, name: String) {
    let peer_name = unquote(&name);
    let host = format!("{peer_name}.grid");
    world.borrow_mut().classification =
        HostClassification::Remote(Some(PeerHost::new(peer_name, "tempZone", host, 1247)));
}

#[given("the container's host resolves remotely without a peer")]
fn given_remote_without_peer(world: &RefCell<TestWorld>) {
    world.borrow_mut().classification = HostClassification::Remote(None);
}

#[given("the host resolver returns locality value {value}")]
fn given_raw_locality(world: &RefCell<TestWorld>, value: i32) {
    world.borrow_mut().classification = HostClassification::from_flag(value, None);
}

#[given("a {format} plugin returning handle {handle}")]
fn given_returning_plugin(world: &RefCell<TestWorld>, format: String, handle: i32) {
    let plugin = Arc::new(StubPlugin::returning(unquote(&format), handle));
    let mut state = world.borrow_mut();
    state.registry.register(plugin.clone()).expect("register plugin");
    state.plugins.push(plugin);
}

#[given("a {format} plugin failing with status {code}")]
fn given_failing_plugin(world: &RefCell<TestWorld>, format: String, code: i32) {
    let plugin = Arc::new(StubPlugin::failing(unquote(&format), code, "archive is corrupt"));
    let mut state = world.borrow_mut();
    state.registry.register(plugin.clone()).expect("register plugin");
    state.plugins.push(plugin);
}

#[given("the peer answers open-directory with status {status}")]
fn given_peer_status(world: &RefCell<TestWorld>, status: i32) {
    world.borrow_mut().proxy = Some(ScriptedProxy::Fixed(status));
}

#[given("the peer refuses connections with status {code}")]
fn given_peer_refuses(world: &RefCell<TestWorld>, code: i32) {
    world.borrow_mut().connector = Some(FakeConnector::refusing(code));
}

#[given("the peer serves {format} containers with handle {handle}")]
fn given_loopback_peer(world: &RefCell<TestWorld>, format: String, handle: i32) {
    let mut registry = PluginRegistry::new();
    registry
        .register(Arc::new(StubPlugin::returning(unquote(&format), handle)))
        .expect("register peer plugin");
    let peer = build_service(
        HostClassification::Local,
        registry,
        FakeConnector::default(),
        ScriptedProxy::Fixed(0),
    );
    world.borrow_mut().proxy = Some(ScriptedProxy::Loopback(Arc::new(peer)));
}

#[when("directory {path} is opened")]
fn when_opened(world: &RefCell<TestWorld>, path: String) {
    world.borrow_mut().open(unquote(&path));
}

#[when("opening directory {path} is attempted twice")]
fn when_opened_twice(world: &RefCell<TestWorld>, path: String) {
    let mut state = world.borrow_mut();
    state.open(unquote(&path));
    state.open(unquote(&path));
}

#[then("the status is {status}")]
fn then_status(world: &RefCell<TestWorld>, status: i32) {
    let state = world.borrow();
    assert_eq!(state.statuses.last().copied(), Some(status));
}

#[then("every status is {status}")]
fn then_every_status(world: &RefCell<TestWorld>, status: i32) {
    let state = world.borrow();
    assert!(!state.statuses.is_empty(), "nothing was opened");
    assert!(
        state.statuses.iter().all(|seen| *seen == status),
        "statuses: {:?}",
        state.statuses
    );
}

#[then("the log mentions {text}")]
fn then_log_mentions(world: &RefCell<TestWorld>, text: String) {
    let state = world.borrow();
    let wanted = unquote(&text);
    assert!(state.logs.contains(wanted), "'{wanted}' not in logs: {}", state.logs);
}

#[then("{count} connection attempt(s) were made")]
fn then_connection_attempts(world: &RefCell<TestWorld>, count: usize) {
    let mut state = world.borrow_mut();
    let attempts = state.service().remote().establisher().connector().attempts();
    assert_eq!(attempts, count);
}

#[then("no local plugin was called")]
fn then_no_local_plugin(world: &RefCell<TestWorld>) {
    let state = world.borrow();
    assert!(state.plugins.iter().all(|plugin| plugin.calls().is_empty()));
}

#[then("the session holds {count} open handle(s)")]
fn then_open_handles(world: &RefCell<TestWorld>, count: usize) {
    let state = world.borrow();
    assert_eq!(state.session.directory_handles().open_count(), count);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "A local container is opened by its format plugin"
)]
fn local_open(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "A peer failure is passed through and logged"
)]
fn remote_failure(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "A remote locality without a peer is rejected"
)]
fn remote_without_peer(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "An unknown locality value is reported"
)]
fn unknown_locality(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "A peer runs the request through its own dispatch"
)]
fn peer_round_trip(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "A refused connection keeps the connection status"
)]
fn refused_connection(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "Repeated plugin failures leave the session unchanged"
)]
fn repeated_failure(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/open_structured_directory.feature",
    name = "Connections to a peer are reused"
)]
fn connection_reuse(world: RefCell<TestWorld>) {
    drop(world);
}
