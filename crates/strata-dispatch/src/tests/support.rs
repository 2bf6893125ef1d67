//! Test doubles and log capture shared by the unit and behaviour tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use strata_plugins::{
    ContainerSpec, HostAddress, PluginDispatch, PluginRegistry, SessionContext, StructFileRequest,
    StructFileType, SubFile,
};

use crate::local::LocalExecutor;
use crate::locality::{HostClassification, HostResolver, PeerHost};
use crate::remote::{
    ConnectError, ConnectionPool, RemoteCallProxy, RemoteDelegator, ServerConnector,
};
use crate::service::StructFileService;

/// Container every test request targets.
pub(crate) const CONTAINER_PATH: &str = "/grid/vaultA/archive.tar";

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `operation` with a thread-local subscriber and returns its output
/// together with everything that was logged.
pub(crate) fn capture_logs<T>(operation: impl FnOnce() -> T) -> (T, String) {
    capture_logs_at(tracing::Level::DEBUG, operation)
}

/// Like [`capture_logs`], keeping only records at `level` or above.
pub(crate) fn capture_logs_at<T>(
    level: tracing::Level,
    operation: impl FnOnce() -> T,
) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, operation);
    (value, logs.contents())
}

/// Builds a request for `sub_path` inside the test container.
pub(crate) fn request_for(
    format: &str,
    sub_path: &str,
    session: Arc<SessionContext>,
) -> StructFileRequest {
    let container = ContainerSpec::new(
        StructFileType::new(format).expect("valid format"),
        CONTAINER_PATH,
        "replResc;archiveResc".parse().expect("valid hierarchy"),
    );
    let sub_file = SubFile::new(
        HostAddress::new("vault-b.grid", 1247, "archiveResc"),
        container,
        sub_path,
    );
    StructFileRequest::new(sub_file, session)
}

pub(crate) fn vault_b() -> PeerHost {
    PeerHost::new("vault-b", "tempZone", "vault-b.grid", 1247)
}

/// Resolver that always answers with the same classification.
#[derive(Debug, Clone)]
pub(crate) struct StaticResolver(pub(crate) HostClassification);

impl HostResolver for StaticResolver {
    fn classify(&self, _address: &HostAddress) -> HostClassification {
        self.0.clone()
    }
}

/// Connection to a fake peer. The peer-side session stands in for the
/// session the peer creates for a server-to-server login.
#[derive(Debug)]
pub(crate) struct FakeConnection {
    pub(crate) peer: String,
    pub(crate) peer_session: Arc<SessionContext>,
}

/// Connector that counts attempts and can be told to refuse.
#[derive(Debug, Default)]
pub(crate) struct FakeConnector {
    attempts: AtomicUsize,
    refuse_with: Option<i32>,
}

impl FakeConnector {
    pub(crate) fn refusing(code: i32) -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            refuse_with: Some(code),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ServerConnector for FakeConnector {
    type Connection = FakeConnection;

    fn connect(&self, peer: &PeerHost) -> Result<FakeConnection, ConnectError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.refuse_with {
            return Err(ConnectError::new(peer.name(), code, "connection refused"));
        }
        Ok(FakeConnection {
            peer: peer.name().to_owned(),
            peer_session: Arc::new(SessionContext::new(900, "peer-admin")),
        })
    }
}

/// Service wired to test doubles.
pub(crate) type TestService =
    StructFileService<StaticResolver, ConnectionPool<FakeConnector>, ScriptedProxy>;

/// Proxy that either answers with a fixed status or runs the request on a
/// second service standing in for the peer.
#[derive(Debug)]
pub(crate) enum ScriptedProxy {
    Fixed(i32),
    Loopback(Arc<TestService>),
}

impl RemoteCallProxy<FakeConnection> for ScriptedProxy {
    fn open_directory(&self, connection: &FakeConnection, sub_file: &SubFile) -> i32 {
        match self {
            Self::Fixed(status) => *status,
            Self::Loopback(peer) => {
                let request =
                    StructFileRequest::new(sub_file.clone(), Arc::clone(&connection.peer_session));
                peer.open_structured_directory_status(&request)
            }
        }
    }
}

pub(crate) fn build_service(
    classification: HostClassification,
    registry: PluginRegistry,
    connector: FakeConnector,
    proxy: ScriptedProxy,
) -> TestService {
    StructFileService::new(
        StaticResolver(classification),
        RemoteDelegator::new(ConnectionPool::new(connector), proxy),
        LocalExecutor::new(PluginDispatch::new(Arc::new(registry))),
    )
}
