//! Dispatch façade - routes path and handle operations to registered drivers.

use crate::error::{VfsError, VfsResult};
use crate::fs::{OpenMode, VfsDriver, VfsFile};
use crate::registry::DriverRegistry;

/// The dispatch façade.
///
/// Owns a [`DriverRegistry`] and translates generic calls into driver calls.
/// There is no process-wide instance; construct one per program (or per test)
/// and pass it where it is needed.
#[derive(Default)]
pub struct Vfs {
    registry: DriverRegistry,
    /// Enable dispatch tracing on stderr.
    pub trace: bool,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `driver` under `letter`. See [`DriverRegistry::register`].
    pub fn register(&mut self, letter: char, driver: Box<dyn VfsDriver>) -> VfsResult<()> {
        self.registry.register(letter, driver)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Open the file at `path`.
    ///
    /// The first character of `path` selects the driver; the rest goes to the
    /// driver unmodified. Opening a missing file in [`OpenMode::Read`] or
    /// [`OpenMode::ReadWrite`] fails with [`VfsError::NotFound`].
    pub fn open(&self, path: &str, mode: OpenMode) -> VfsResult<FileHandle> {
        let (letter, rest) = split_drive_path(path)?;
        if self.trace {
            eprintln!("[vfs] open {}:{} ({:?})", letter, rest, mode);
        }
        let driver = self.registry.lookup(letter)?;
        let file = driver.open(rest, mode)?;
        Ok(FileHandle {
            letter,
            file: Some(file),
        })
    }

    /// Delete the file at `path`.
    pub fn remove(&self, path: &str) -> VfsResult<()> {
        let (letter, rest) = split_drive_path(path)?;
        if self.trace {
            eprintln!("[vfs] remove {}:{}", letter, rest);
        }
        self.registry.lookup(letter)?.remove(rest)
    }

    /// Rename `old_path` to `new_path`.
    ///
    /// Both paths must carry the same drive letter; a cross-drive rename is
    /// rejected with [`VfsError::InvalidParameter`] before any driver is
    /// consulted.
    pub fn rename(&self, old_path: &str, new_path: &str) -> VfsResult<()> {
        let (old_letter, old_rest) = split_drive_path(old_path)?;
        let (new_letter, new_rest) = split_drive_path(new_path)?;
        if old_letter != new_letter {
            return Err(VfsError::InvalidParameter(
                "rename paths on different drives",
            ));
        }
        if self.trace {
            eprintln!("[vfs] rename {}:{} -> {}", old_letter, old_rest, new_rest);
        }
        self.registry.lookup(old_letter)?.rename(old_rest, new_rest)
    }
}

/// Split a path into its drive letter and the driver-defined remainder.
///
/// A single `:` directly after the letter is consumed, so `F:test.txt` and
/// `Ftest.txt` both hand `test.txt` to the driver registered under `F`.
fn split_drive_path(path: &str) -> VfsResult<(char, &str)> {
    let letter = path
        .chars()
        .next()
        .ok_or(VfsError::InvalidParameter("empty path"))?;
    let rest = &path[letter.len_utf8()..];
    Ok((letter, rest.strip_prefix(':').unwrap_or(rest)))
}

/// Caller-visible handle to one open file.
///
/// A handle is valid between a successful [`Vfs::open`] and [`close`]. Every
/// operation on a closed handle fails with [`VfsError::InvalidParameter`];
/// close is terminal and the handle cannot be reopened. Dropping a handle
/// without closing releases the backend file silently.
///
/// A handle belongs to a single owner; sharing one across threads requires
/// external synchronization.
///
/// [`close`]: FileHandle::close
pub struct FileHandle {
    letter: char,
    file: Option<Box<dyn VfsFile>>,
}

impl FileHandle {
    /// Drive letter this handle was opened through.
    pub fn drive(&self) -> char {
        self.letter
    }

    /// Whether the handle is still open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn file_mut(&mut self) -> VfsResult<&mut (dyn VfsFile + 'static)> {
        self.file
            .as_deref_mut()
            .ok_or(VfsError::InvalidParameter("operation on closed handle"))
    }

    /// Read up to `max_bytes` bytes from the cursor position.
    ///
    /// The returned buffer holds exactly the bytes the backend could supply;
    /// a short buffer at end of stream is success.
    pub fn read(&mut self, max_bytes: u32) -> VfsResult<Vec<u8>> {
        let file = self.file_mut()?;
        let mut buf = vec![0u8; max_bytes as usize];
        let n = file.read(&mut buf)? as usize;
        buf.truncate(n);
        Ok(buf)
    }

    /// Write `data` at the cursor position, returning the count written.
    pub fn write(&mut self, data: &[u8]) -> VfsResult<u32> {
        self.file_mut()?.write(data)
    }

    /// Move the cursor to an absolute byte offset.
    pub fn seek(&mut self, pos: u32) -> VfsResult<()> {
        self.file_mut()?.seek(pos)
    }

    /// Current absolute cursor position.
    pub fn tell(&mut self) -> VfsResult<u32> {
        self.file_mut()?.tell()
    }

    /// Total file length in bytes. The cursor is left where it was.
    pub fn size(&mut self) -> VfsResult<u32> {
        self.file_mut()?.size()
    }

    /// Close the handle.
    ///
    /// The handle is invalid afterwards regardless of the outcome; a failed
    /// close cannot be retried.
    pub fn close(&mut self) -> VfsResult<()> {
        match self.file.take() {
            Some(mut file) => file.close(),
            None => Err(VfsError::InvalidParameter("operation on closed handle")),
        }
    }
}
