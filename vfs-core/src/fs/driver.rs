//! Driver traits - the interface every drive backend implements.

use crate::error::VfsResult;

/// How a file is opened.
///
/// The mode fixes what the backend does on open and which operations the
/// resulting file accepts afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only. The file must exist.
    Read,
    /// Write-only. Creates the file, truncating any existing content.
    Write,
    /// Read and write on an existing file, without truncation.
    ReadWrite,
}

/// Backend for a single drive letter.
///
/// A driver receives the path remainder after the drive letter (and an
/// optional `:` separator) have been stripped; how it interprets that
/// remainder is its own business. Drivers are registered once and live for
/// the lifetime of the registry that owns them.
pub trait VfsDriver: Send + Sync {
    /// Open a file. Returns the driver's own file stream, which the caller
    /// wraps in a [`FileHandle`](crate::vfs::FileHandle).
    fn open(&self, path: &str, mode: OpenMode) -> VfsResult<Box<dyn VfsFile>>;

    /// Delete a file.
    fn remove(&self, path: &str) -> VfsResult<()>;

    /// Rename a file. Both paths are remainders on this same drive.
    fn rename(&self, old_path: &str, new_path: &str) -> VfsResult<()>;
}

/// An open file stream owned by one driver.
///
/// Positions and sizes are absolute byte offsets from the start of the file.
/// Seeking past the end is allowed; what happens then is decided by the
/// backend on the next read or write.
pub trait VfsFile: Send {
    /// Read up to `buf.len()` bytes into `buf`, returning the count actually
    /// read. A short count at end of stream is success, not an error.
    fn read(&mut self, buf: &mut [u8]) -> VfsResult<u32>;

    /// Write `data`, returning the count actually written. May be short on a
    /// constrained backend; retrying is the caller's policy.
    fn write(&mut self, data: &[u8]) -> VfsResult<u32>;

    /// Move the cursor to an absolute byte offset.
    fn seek(&mut self, pos: u32) -> VfsResult<()>;

    /// Current absolute cursor position.
    fn tell(&mut self) -> VfsResult<u32>;

    /// Total file length in bytes. Must leave the cursor where it was.
    fn size(&mut self) -> VfsResult<u32>;

    /// Release the file. Called exactly once, by
    /// [`FileHandle::close`](crate::vfs::FileHandle::close).
    fn close(&mut self) -> VfsResult<()>;
}
