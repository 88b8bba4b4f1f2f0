//! Host filesystem drive backend.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::driver::{OpenMode, VfsDriver, VfsFile};
use crate::error::{VfsError, VfsResult};

/// Drive backed by the host filesystem.
///
/// By default the path remainder is handed to the host as-is. [`rooted`]
/// joins remainders under a base directory instead; an absolute remainder
/// still escapes the root, there is no confinement.
///
/// [`rooted`]: HostDrive::rooted
#[derive(Default, Clone)]
pub struct HostDrive {
    root: Option<PathBuf>,
}

impl HostDrive {
    /// Paths pass through to the host verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths resolve under `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

fn map_io_error(err: io::Error, path: &Path) -> VfsError {
    if err.kind() == io::ErrorKind::NotFound {
        VfsError::NotFound(path.display().to_string())
    } else {
        VfsError::Unknown(err.to_string())
    }
}

impl VfsDriver for HostDrive {
    fn open(&self, path: &str, mode: OpenMode) -> VfsResult<Box<dyn VfsFile>> {
        let full = self.resolve(path);
        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::Write => options.write(true).create(true).truncate(true),
            OpenMode::ReadWrite => options.read(true).write(true),
        };
        let file = options.open(&full).map_err(|e| map_io_error(e, &full))?;
        Ok(Box::new(HostFile { file }))
    }

    fn remove(&self, path: &str) -> VfsResult<()> {
        let full = self.resolve(path);
        std::fs::remove_file(&full).map_err(|e| map_io_error(e, &full))
    }

    fn rename(&self, old_path: &str, new_path: &str) -> VfsResult<()> {
        let old = self.resolve(old_path);
        let new = self.resolve(new_path);
        std::fs::rename(&old, &new).map_err(|e| map_io_error(e, &old))
    }
}

/// Open stream on a host file.
struct HostFile {
    file: File,
}

impl VfsFile for HostFile {
    fn read(&mut self, buf: &mut [u8]) -> VfsResult<u32> {
        let mut total = 0;
        while total < buf.len() {
            match self.file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(VfsError::Unknown(e.to_string())),
            }
        }
        Ok(total as u32)
    }

    fn write(&mut self, data: &[u8]) -> VfsResult<u32> {
        loop {
            match self.file.write(data) {
                Ok(n) => return Ok(n as u32),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(VfsError::Unknown(e.to_string())),
            }
        }
    }

    fn seek(&mut self, pos: u32) -> VfsResult<()> {
        self.file
            .seek(SeekFrom::Start(u64::from(pos)))
            .map_err(|e| VfsError::Unknown(e.to_string()))?;
        Ok(())
    }

    fn tell(&mut self) -> VfsResult<u32> {
        let pos = self
            .file
            .stream_position()
            .map_err(|e| VfsError::Unknown(e.to_string()))?;
        u32::try_from(pos).map_err(|_| VfsError::Unknown("cursor beyond 4 GiB".to_string()))
    }

    fn size(&mut self) -> VfsResult<u32> {
        let saved = self
            .file
            .stream_position()
            .map_err(|e| VfsError::Unknown(e.to_string()))?;
        let end = self
            .file
            .seek(SeekFrom::End(0))
            .map_err(|e| VfsError::Unknown(e.to_string()));
        // Put the cursor back before reporting any probe failure
        let restored = self
            .file
            .seek(SeekFrom::Start(saved))
            .map_err(|e| VfsError::Unknown(e.to_string()));
        let end = end?;
        restored?;
        u32::try_from(end).map_err(|_| VfsError::Unknown("file larger than 4 GiB".to_string()))
    }

    fn close(&mut self) -> VfsResult<()> {
        // File buffers nothing in user space; dropping releases the descriptor
        Ok(())
    }
}
