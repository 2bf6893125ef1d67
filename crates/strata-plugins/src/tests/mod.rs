//! Crate-level integration and BDD tests.

use std::sync::Arc;

use crate::address::HostAddress;
use crate::format::StructFileType;
use crate::request::{ContainerSpec, StructFileRequest, SubFile};
use crate::session::SessionContext;


/// Builds a request for `sub_path` inside a container of the given format.
pub(crate) fn request_for(
    format: &str,
    sub_path: &str,
    session: Arc<SessionContext>,
) -> StructFileRequest {
    let sub_file = SubFile::new(
        HostAddress::new("localhost", 1247, "archiveResc"),
        ContainerSpec::new(
            StructFileType::new(format).expect("valid format"),
            "/grid/vaultA/archive.tar",
            "replResc;archiveResc".parse().expect("valid hierarchy"),
        ),
        sub_path,
    );
    StructFileRequest::new(sub_file, session)
}
