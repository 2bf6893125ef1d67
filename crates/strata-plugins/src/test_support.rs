//! Stub plugins for exercising dispatch without a real container format.

use std::sync::{Mutex, PoisonError};

use crate::error::PluginFailure;
use crate::format::StructFileType;
use crate::hierarchy::ResourceHierarchy;
use crate::object::StructuredObject;
use crate::plugin::StructFilePlugin;
use crate::session::DirectoryHandle;

/// Status a [`StubPlugin`] reports when its session has no free handles.
pub const HANDLES_EXHAUSTED: i32 = -1_000_010;

/// What a [`StubPlugin`] does when asked to open a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubBehaviour {
    /// Returns the given handle without touching the session.
    Fixed(DirectoryHandle),
    /// Allocates a handle from the object's session.
    Allocate,
    /// Fails with the given status and message.
    Fail {
        /// Status code to report.
        code: i32,
        /// Message to report.
        message: String,
    },
}

/// Details of one call observed by a [`StubPlugin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCall {
    /// Physical path the plugin was asked to open.
    pub physical_path: String,
    /// Hierarchy attached to the object.
    pub hierarchy: ResourceHierarchy,
    /// Session the object belonged to.
    pub session_id: u64,
}

/// Configurable plugin that records every call it receives.
#[derive(Debug)]
pub struct StubPlugin {
    format: StructFileType,
    behaviour: StubBehaviour,
    calls: Mutex<Vec<ObservedCall>>,
}

impl StubPlugin {
    /// Builds a stub for `format` with the given behaviour.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not a valid format identifier.
    #[must_use]
    pub fn new(format: &str, behaviour: StubBehaviour) -> Self {
        let Ok(parsed) = StructFileType::new(format) else {
            panic!("invalid stub format '{format}'");
        };
        Self {
            format: parsed,
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Builds a stub that always returns `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is negative or `format` is invalid.
    #[must_use]
    pub fn returning(format: &str, handle: i32) -> Self {
        let Ok(fixed) = DirectoryHandle::try_from(handle) else {
            panic!("stub handle must be non-negative, got {handle}");
        };
        Self::new(format, StubBehaviour::Fixed(fixed))
    }

    /// Builds a stub that allocates handles from the session.
    ///
    /// # Panics
    ///
    /// Panics if `format` is invalid.
    #[must_use]
    pub fn allocating(format: &str) -> Self {
        Self::new(format, StubBehaviour::Allocate)
    }

    /// Builds a stub that always fails.
    ///
    /// # Panics
    ///
    /// Panics if `format` is invalid.
    #[must_use]
    pub fn failing(format: &str, code: i32, message: &str) -> Self {
        Self::new(
            format,
            StubBehaviour::Fail {
                code,
                message: message.to_owned(),
            },
        )
    }

    /// Returns the calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ObservedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StructFilePlugin for StubPlugin {
    fn format(&self) -> &StructFileType {
        &self.format
    }

    fn open_directory(&self, object: &StructuredObject) -> Result<DirectoryHandle, PluginFailure> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ObservedCall {
                physical_path: object.physical_path().to_owned(),
                hierarchy: object.hierarchy().clone(),
                session_id: object.session().id(),
            });

        match &self.behaviour {
            StubBehaviour::Fixed(handle) => Ok(*handle),
            StubBehaviour::Allocate => object
                .session()
                .directory_handles()
                .allocate()
                .ok_or_else(|| PluginFailure::new(HANDLES_EXHAUSTED, "no free directory handles")),
            StubBehaviour::Fail { code, message } => {
                Err(PluginFailure::new(*code, message.clone()))
            }
        }
    }
}
