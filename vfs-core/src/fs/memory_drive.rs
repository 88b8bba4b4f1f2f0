//! In-memory drive backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::driver::{OpenMode, VfsDriver, VfsFile};
use crate::error::{VfsError, VfsResult};

type FileMap = HashMap<String, Vec<u8>>;

/// Simple in-memory drive.
///
/// Files live in a shared map and open streams write through to it, so a
/// write is visible to the drive as soon as the call returns. Removing a
/// file while a stream on it is still open invalidates that stream; its next
/// operation reports [`VfsError::NotFound`].
#[derive(Default, Clone)]
pub struct MemoryDrive {
    files: Arc<Mutex<FileMap>>,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial files.
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        let files = files.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }

    /// Add a file (convenience method).
    pub fn add_file(&self, name: &str, data: impl Into<Vec<u8>>) -> VfsResult<()> {
        self.lock()?.insert(name.to_string(), data.into());
        Ok(())
    }

    /// Check if a file exists.
    pub fn exists(&self, name: &str) -> VfsResult<bool> {
        Ok(self.lock()?.contains_key(name))
    }

    fn lock(&self) -> VfsResult<MutexGuard<'_, FileMap>> {
        self.files.lock().map_err(|_| VfsError::LockPoisoned)
    }
}

impl VfsDriver for MemoryDrive {
    fn open(&self, path: &str, mode: OpenMode) -> VfsResult<Box<dyn VfsFile>> {
        let mut files = self.lock()?;
        match mode {
            OpenMode::Read | OpenMode::ReadWrite => {
                if !files.contains_key(path) {
                    return Err(VfsError::NotFound(path.to_string()));
                }
            }
            OpenMode::Write => {
                files.insert(path.to_string(), Vec::new());
            }
        }
        Ok(Box::new(MemoryFile {
            files: Arc::clone(&self.files),
            name: path.to_string(),
            pos: 0,
            readable: mode != OpenMode::Write,
            writable: mode != OpenMode::Read,
        }))
    }

    fn remove(&self, path: &str) -> VfsResult<()> {
        match self.lock()?.remove(path) {
            Some(_) => Ok(()),
            None => Err(VfsError::NotFound(path.to_string())),
        }
    }

    fn rename(&self, old_path: &str, new_path: &str) -> VfsResult<()> {
        let mut files = self.lock()?;
        match files.remove(old_path) {
            Some(data) => {
                // Overwrites any existing target, like a host rename
                files.insert(new_path.to_string(), data);
                Ok(())
            }
            None => Err(VfsError::NotFound(old_path.to_string())),
        }
    }
}

/// Open stream on a [`MemoryDrive`] file.
struct MemoryFile {
    files: Arc<Mutex<FileMap>>,
    name: String,
    pos: u32,
    readable: bool,
    writable: bool,
}

impl MemoryFile {
    fn lock(&self) -> VfsResult<MutexGuard<'_, FileMap>> {
        self.files.lock().map_err(|_| VfsError::LockPoisoned)
    }
}

impl VfsFile for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> VfsResult<u32> {
        if !self.readable {
            return Err(VfsError::InvalidParameter("file not open for reading"));
        }
        let files = self.lock()?;
        let data = files
            .get(&self.name)
            .ok_or_else(|| VfsError::NotFound(self.name.clone()))?;

        let pos = self.pos as usize;
        if pos >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - pos);
        buf[..n].copy_from_slice(&data[pos..pos + n]);
        drop(files);
        self.pos += n as u32;
        Ok(n as u32)
    }

    fn write(&mut self, data: &[u8]) -> VfsResult<u32> {
        if !self.writable {
            return Err(VfsError::InvalidParameter("file not open for writing"));
        }
        let mut files = self.lock()?;
        let content = files
            .get_mut(&self.name)
            .ok_or_else(|| VfsError::NotFound(self.name.clone()))?;

        let pos = self.pos as usize;
        let end = pos + data.len();
        let end_pos =
            u32::try_from(end).map_err(|_| VfsError::Unknown("file too large".to_string()))?;
        // Zero-fill the gap when the cursor was seeked past the end
        if content.len() < end {
            content.resize(end, 0);
        }
        content[pos..end].copy_from_slice(data);
        drop(files);
        self.pos = end_pos;
        Ok(data.len() as u32)
    }

    fn seek(&mut self, pos: u32) -> VfsResult<()> {
        self.pos = pos;
        Ok(())
    }

    fn tell(&mut self) -> VfsResult<u32> {
        Ok(self.pos)
    }

    fn size(&mut self) -> VfsResult<u32> {
        let files = self.lock()?;
        let data = files
            .get(&self.name)
            .ok_or_else(|| VfsError::NotFound(self.name.clone()))?;
        u32::try_from(data.len()).map_err(|_| VfsError::Unknown("file too large".to_string()))
    }

    fn close(&mut self) -> VfsResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_back() {
        let drive = MemoryDrive::new();

        let mut file = drive.open("test.txt", OpenMode::Write).unwrap();
        assert_eq!(file.write(b"hello").unwrap(), 5);
        file.close().unwrap();

        let mut file = drive.open("test.txt", OpenMode::Read).unwrap();
        let mut buf = [0u8; 20];
        assert_eq!(file.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
        // At end of stream, reads keep succeeding with zero bytes
        assert_eq!(file.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_open_read_missing_file() {
        let drive = MemoryDrive::new();
        assert!(matches!(
            drive.open("missing.txt", OpenMode::Read),
            Err(VfsError::NotFound(_))
        ));
        assert!(matches!(
            drive.open("missing.txt", OpenMode::ReadWrite),
            Err(VfsError::NotFound(_))
        ));
    }

    #[test]
    fn test_write_mode_truncates() {
        let drive = MemoryDrive::with_files([("test.txt", b"longer content".to_vec())]);

        let mut file = drive.open("test.txt", OpenMode::Write).unwrap();
        file.write(b"new").unwrap();
        assert_eq!(file.size().unwrap(), 3);
    }

    #[test]
    fn test_read_write_mode_keeps_content() {
        let drive = MemoryDrive::with_files([("test.txt", b"abcdef".to_vec())]);

        let mut file = drive.open("test.txt", OpenMode::ReadWrite).unwrap();
        file.write(b"XY").unwrap();
        file.seek(0).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(file.read(&mut buf).unwrap(), 6);
        assert_eq!(&buf, b"XYcdef");
    }

    #[test]
    fn test_mode_enforcement() {
        let drive = MemoryDrive::with_files([("test.txt", b"data".to_vec())]);

        let mut wr = drive.open("test.txt", OpenMode::Write).unwrap();
        let mut buf = [0u8; 4];
        assert!(matches!(
            wr.read(&mut buf),
            Err(VfsError::InvalidParameter(_))
        ));

        let mut rd = drive.open("test.txt", OpenMode::Read).unwrap();
        assert!(matches!(
            rd.write(b"x"),
            Err(VfsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_seek_past_end_zero_fills_on_write() {
        let drive = MemoryDrive::new();

        let mut file = drive.open("sparse.bin", OpenMode::Write).unwrap();
        file.seek(4).unwrap();
        file.write(b"ab").unwrap();
        assert_eq!(file.size().unwrap(), 6);

        file.seek(0).unwrap();
        let mut buf = [0u8; 6];
        file.close().unwrap();

        let mut file = drive.open("sparse.bin", OpenMode::Read).unwrap();
        file.read(&mut buf).unwrap();
        assert_eq!(&buf, b"\0\0\0\0ab");
    }

    #[test]
    fn test_size_does_not_move_cursor() {
        let drive = MemoryDrive::with_files([("test.txt", b"0123456789".to_vec())]);

        let mut file = drive.open("test.txt", OpenMode::Read).unwrap();
        file.seek(7).unwrap();
        assert_eq!(file.size().unwrap(), 10);
        assert_eq!(file.tell().unwrap(), 7);
    }

    #[test]
    fn test_remove_and_rename() {
        let drive = MemoryDrive::with_files([("old.txt", b"data".to_vec())]);

        drive.rename("old.txt", "new.txt").unwrap();
        assert!(!drive.exists("old.txt").unwrap());
        assert!(drive.exists("new.txt").unwrap());

        drive.remove("new.txt").unwrap();
        assert!(!drive.exists("new.txt").unwrap());
        assert!(matches!(
            drive.remove("new.txt"),
            Err(VfsError::NotFound(_))
        ));
        assert!(matches!(
            drive.rename("new.txt", "other.txt"),
            Err(VfsError::NotFound(_))
        ));
    }

    #[test]
    fn test_writes_are_visible_through_the_drive() {
        let drive = MemoryDrive::new();
        let mut file = drive.open("live.txt", OpenMode::Write).unwrap();
        file.write(b"visible").unwrap();

        // No close needed; streams write through
        assert!(drive.exists("live.txt").unwrap());
    }
}
