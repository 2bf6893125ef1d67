//! Client session context and session-scoped directory handles.
//!
//! A [`SessionContext`] travels with every request. Plugins that open a
//! virtual directory allocate the returned [`DirectoryHandle`] from the
//! session's [`HandleAllocator`], which guarantees that no two open
//! directories in one session share a handle value.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::ModelError;

/// Number of directories a session may hold open at once by default.
pub const DEFAULT_MAX_OPEN_DIRECTORIES: usize = 1024;

/// Opaque, non-negative identifier of an open virtual directory.
///
/// # Example
///
/// ```
/// use strata_plugins::DirectoryHandle;
///
/// let handle = DirectoryHandle::try_from(5).unwrap();
/// assert_eq!(handle.get(), 5);
/// assert!(DirectoryHandle::try_from(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryHandle(i32);

impl DirectoryHandle {
    /// Returns the raw handle value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for DirectoryHandle {
    type Error = ModelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(ModelError::NegativeHandle { value });
        }
        Ok(Self(value))
    }
}

impl From<DirectoryHandle> for i32 {
    fn from(handle: DirectoryHandle) -> Self {
        handle.0
    }
}

impl fmt::Display for DirectoryHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Hands out the lowest free handle value within one session.
#[derive(Debug)]
pub struct HandleAllocator {
    capacity: usize,
    open: Mutex<BTreeSet<i32>>,
}

impl HandleAllocator {
    /// Builds an allocator that allows at most `capacity` open handles.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            open: Mutex::new(BTreeSet::new()),
        }
    }

    /// Reserves the lowest unused handle, or `None` when the session is full.
    #[must_use]
    pub fn allocate(&self) -> Option<DirectoryHandle> {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if open.len() >= self.capacity {
            return None;
        }
        let value = (0..=i32::MAX).find(|candidate| !open.contains(candidate))?;
        open.insert(value);
        Some(DirectoryHandle(value))
    }

    /// Releases a handle. Returns `false` when it was not open.
    pub fn release(&self, handle: DirectoryHandle) -> bool {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle.0)
    }

    /// Returns `true` when the handle is currently open.
    #[must_use]
    pub fn is_open(&self, handle: DirectoryHandle) -> bool {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&handle.0)
    }

    /// Returns the number of open handles.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_OPEN_DIRECTORIES)
    }
}

/// The caller's ongoing client session.
#[derive(Debug)]
pub struct SessionContext {
    id: u64,
    client_user: String,
    directory_handles: HandleAllocator,
}

impl SessionContext {
    /// Builds a session for the given client user.
    #[must_use]
    pub fn new(id: u64, client_user: impl Into<String>) -> Self {
        Self {
            id,
            client_user: client_user.into(),
            directory_handles: HandleAllocator::default(),
        }
    }

    /// Builds a session with a custom open-directory limit.
    #[must_use]
    pub fn with_directory_limit(id: u64, client_user: impl Into<String>, limit: usize) -> Self {
        Self {
            id,
            client_user: client_user.into(),
            directory_handles: HandleAllocator::with_capacity(limit),
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the authenticated client user name.
    #[must_use]
    pub fn client_user(&self) -> &str {
        self.client_user.as_str()
    }

    /// Returns the allocator for this session's directory handles.
    #[must_use]
    pub const fn directory_handles(&self) -> &HandleAllocator {
        &self.directory_handles
    }
}
