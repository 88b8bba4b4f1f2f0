//! Shared, thread-safe wrapper around the VFS.
//!
//! A [`SharedVfs`] protects the registry with a readers-writer lock:
//! registration takes the write lock, dispatch takes the read lock, so
//! registering a driver after dispatch has begun is safe here. File handles
//! are unaffected; each one still belongs to a single owner at a time.

use std::sync::{Arc, RwLock};

use crate::error::{VfsError, VfsResult};
use crate::fs::{OpenMode, VfsDriver};
use crate::vfs::{FileHandle, Vfs};

/// Cheap-to-clone handle on a shared [`Vfs`]. All clones see the same
/// registry.
#[derive(Clone, Default)]
pub struct SharedVfs {
    inner: Arc<RwLock<Vfs>>,
}

impl SharedVfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-populated [`Vfs`].
    pub fn from_vfs(vfs: Vfs) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vfs)),
        }
    }

    /// Register `driver` under `letter`.
    pub fn register(&self, letter: char, driver: Box<dyn VfsDriver>) -> VfsResult<()> {
        self.inner
            .write()
            .map_err(|_| VfsError::LockPoisoned)?
            .register(letter, driver)
    }

    /// Open the file at `path`. See [`Vfs::open`].
    pub fn open(&self, path: &str, mode: OpenMode) -> VfsResult<FileHandle> {
        self.inner
            .read()
            .map_err(|_| VfsError::LockPoisoned)?
            .open(path, mode)
    }

    /// Delete the file at `path`. See [`Vfs::remove`].
    pub fn remove(&self, path: &str) -> VfsResult<()> {
        self.inner
            .read()
            .map_err(|_| VfsError::LockPoisoned)?
            .remove(path)
    }

    /// Rename `old_path` to `new_path`. See [`Vfs::rename`].
    pub fn rename(&self, old_path: &str, new_path: &str) -> VfsResult<()> {
        self.inner
            .read()
            .map_err(|_| VfsError::LockPoisoned)?
            .rename(old_path, new_path)
    }
}
