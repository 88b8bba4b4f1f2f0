//! Drive-letter virtual filesystem core.
//!
//! This crate routes file operations to pluggable backends through a
//! one-character drive letter at the front of each path: `F:notes.txt` goes
//! to whatever driver is registered under `F`.
//!
//! # Architecture
//!
//! The layer is small and strictly layered:
//! - `VfsDriver` / `VfsFile` traits: the interface a backend implements
//! - `DriverRegistry`: letter-to-driver table, populated at startup
//! - `Vfs`: path-based dispatch façade, one instance per program or test
//! - `FileHandle`: caller-visible open file, valid from open to close
//! - `SharedVfs`: `Arc<RwLock<..>>` wrapper for multi-threaded dispatch
//!
//! Two backends ship with the crate: `HostDrive` (host filesystem) and
//! `MemoryDrive` (in-memory, handy for tests and sandboxes).
//!
//! ```
//! use vfs_core::{MemoryDrive, OpenMode, Vfs};
//!
//! let mut vfs = Vfs::new();
//! vfs.register('F', Box::new(MemoryDrive::new()))?;
//!
//! let mut file = vfs.open("F:hello.txt", OpenMode::Write)?;
//! file.write(b"hello")?;
//! file.close()?;
//!
//! let mut file = vfs.open("F:hello.txt", OpenMode::Read)?;
//! assert_eq!(file.read(16)?, b"hello");
//! file.close()?;
//! # Ok::<(), vfs_core::VfsError>(())
//! ```

pub mod error;
pub mod fs;
pub mod registry;
pub mod shared;
pub mod vfs;

pub use error::{VfsError, VfsResult};
pub use fs::{HostDrive, MemoryDrive, OpenMode, VfsDriver, VfsFile};
pub use registry::DriverRegistry;
pub use shared::SharedVfs;
pub use vfs::{FileHandle, Vfs};
