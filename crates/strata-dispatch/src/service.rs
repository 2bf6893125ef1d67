//! Entry point for opening a directory inside a structured file.

use tracing::debug;

use strata_plugins::{DirectoryHandle, StructFileRequest};

use crate::errors::{StructFileError, status_of};
use crate::local::LocalExecutor;
use crate::locality::{HostResolver, ResolvedLocality, resolve_locality};
use crate::remote::{ConnectionEstablisher, RemoteCallProxy, RemoteDelegator};

/// Tracing target for the dispatch service.
pub const SERVICE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::service");

/// Routes open-directory requests to local plugins or to the owning peer.
///
/// Locality is resolved exactly once per request and the request runs on
/// exactly one branch. The service keeps no per-request state, so one
/// instance may serve concurrent sessions.
#[derive(Debug)]
pub struct StructFileService<H, E, P> {
    resolver: H,
    remote: RemoteDelegator<E, P>,
    local: LocalExecutor,
}

impl<H, E, P> StructFileService<H, E, P>
where
    H: HostResolver,
    E: ConnectionEstablisher,
    P: RemoteCallProxy<E::Connection>,
{
    /// Assembles a service from its collaborators.
    pub const fn new(resolver: H, remote: RemoteDelegator<E, P>, local: LocalExecutor) -> Self {
        Self {
            resolver,
            remote,
            local,
        }
    }

    /// Returns the host resolver.
    pub const fn resolver(&self) -> &H {
        &self.resolver
    }

    /// Returns the remote delegator.
    pub const fn remote(&self) -> &RemoteDelegator<E, P> {
        &self.remote
    }

    /// Returns the local executor.
    pub const fn local(&self) -> &LocalExecutor {
        &self.local
    }

    /// Opens a directory inside the container named by `request`.
    ///
    /// # Errors
    ///
    /// Returns the [`StructFileError`] raised by locality resolution or by
    /// whichever branch executed the request.
    pub fn open_structured_directory(
        &self,
        request: &StructFileRequest,
    ) -> Result<DirectoryHandle, StructFileError> {
        match resolve_locality(&self.resolver, request.address())? {
            ResolvedLocality::Local => {
                debug!(
                    target: SERVICE_TARGET,
                    path = request.sub_path(),
                    "opening structured directory locally"
                );
                self.local.open_directory(request)
            }
            ResolvedLocality::Remote(peer) => {
                debug!(
                    target: SERVICE_TARGET,
                    path = request.sub_path(),
                    peer = peer.as_ref().map(crate::locality::PeerHost::name),
                    "forwarding structured directory open"
                );
                self.remote.open_directory(request, peer.as_ref())
            }
        }
    }

    /// Same as [`Self::open_structured_directory`], collapsed to a status:
    /// a handle when non-negative, an error code otherwise.
    pub fn open_structured_directory_status(&self, request: &StructFileRequest) -> i32 {
        status_of(&self.open_structured_directory(request))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    use mockall::mock;
    use rstest::rstest;
    use strata_plugins::test_support::StubPlugin;
    use strata_plugins::{PluginDispatch, PluginRegistry, SessionContext, SubFile};

    use super::*;
    use crate::locality::{HostClassification, PeerHost};
    use crate::remote::ConnectError;
    use crate::tests::support::{
        FakeConnection, FakeConnector, ScriptedProxy, StaticResolver, build_service, request_for,
    };

    mock! {
        Establisher {}
        impl ConnectionEstablisher for Establisher {
            type Connection = FakeConnection;
            fn acquire(&self, peer: &PeerHost) -> Result<Arc<FakeConnection>, ConnectError>;
        }
    }

    mock! {
        Proxy {}
        impl RemoteCallProxy<FakeConnection> for Proxy {
            fn open_directory(&self, connection: &FakeConnection, sub_file: &SubFile) -> i32;
        }
    }

    fn registry_with(plugin: StubPlugin) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(plugin)).expect("register plugin");
        registry
    }

    #[rstest]
    #[case::local(HostClassification::Local, 4)]
    #[case::unresolved(HostClassification::Unresolved(-26_000), -26_000)]
    #[case::unrecognised(HostClassification::Unrecognised(9), crate::errors::UNRECOGNISED_LOCALITY)]
    fn non_remote_outcomes_never_touch_peers(
        #[case] classification: HostClassification,
        #[case] expected: i32,
    ) {
        let mut establisher = MockEstablisher::new();
        establisher.expect_acquire().never();
        let mut proxy = MockProxy::new();
        proxy.expect_open_directory().never();
        let service = StructFileService::new(
            StaticResolver(classification),
            RemoteDelegator::new(establisher, proxy),
            LocalExecutor::new(PluginDispatch::new(Arc::new(registry_with(
                StubPlugin::returning("tar", 4),
            )))),
        );
        let request = request_for("tar", "/docs", Arc::new(SessionContext::new(1, "rods")));

        assert_eq!(service.open_structured_directory_status(&request), expected);
    }

    #[test]
    fn resolver_failures_report_resolver_status() {
        let service = build_service(
            HostClassification::Unresolved(-26_123),
            PluginRegistry::new(),
            FakeConnector::default(),
            ScriptedProxy::Fixed(0),
        );
        let request = request_for("tar", "/docs", Arc::new(SessionContext::new(1, "rods")));

        let error = service
            .open_structured_directory(&request)
            .expect_err("host is unresolved");
        assert!(matches!(error, StructFileError::UnresolvedHost { code: -26_123, .. }));
    }

    #[test]
    fn concurrent_opens_in_one_session_get_distinct_handles() {
        let service = build_service(
            HostClassification::Local,
            registry_with(StubPlugin::allocating("tar")),
            FakeConnector::default(),
            ScriptedProxy::Fixed(0),
        );
        let session = Arc::new(SessionContext::new(5, "rods"));

        let handles: BTreeSet<i32> = thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|index| {
                    let path = format!("/docs/{index}");
                    let request = request_for("tar", &path, Arc::clone(&session));
                    let shared = &service;
                    scope.spawn(move || shared.open_structured_directory_status(&request))
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("worker finished"))
                .collect()
        });

        assert_eq!(handles.len(), 8);
        assert!(handles.iter().all(|handle| *handle >= 0));
        assert_eq!(session.directory_handles().open_count(), 8);
    }
}
