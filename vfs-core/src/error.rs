//! Error types for the virtual filesystem layer.

use thiserror::Error;

/// Errors that can occur during dispatch or inside a driver.
#[derive(Error, Debug)]
pub enum VfsError {
    #[error("No driver registered for drive letter '{0}'")]
    UnknownDriver(char),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("Driver already registered for drive letter '{0}'")]
    DuplicateDriver(char),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Backend error: {0}")]
    Unknown(String),
}

/// Result type for VFS operations.
pub type VfsResult<T> = Result<T, VfsError>;
