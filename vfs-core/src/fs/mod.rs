//! Drive backends for the VFS layer.
//!
//! - `VfsDriver` / `VfsFile`: the interface every backend implements
//! - `HostDrive`: host-filesystem backend
//! - `MemoryDrive`: in-memory backend

mod driver;
mod host_drive;
mod memory_drive;

pub use driver::{OpenMode, VfsDriver, VfsFile};
pub use host_drive::HostDrive;
pub use memory_drive::MemoryDrive;
