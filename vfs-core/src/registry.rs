//! Driver registry - maps drive letters to driver implementations.

use crate::error::{VfsError, VfsResult};
use crate::fs::VfsDriver;

/// One registered backend.
struct RegisteredDriver {
    letter: char,
    driver: Box<dyn VfsDriver>,
}

/// Table of registered drivers, keyed by drive letter.
///
/// Letters are unique: registering a taken letter fails with
/// [`VfsError::DuplicateDriver`] and leaves the existing driver in place.
/// The table is meant to be populated during startup, before any dispatch
/// call; mutating it while dispatch is in flight is only in contract through
/// [`SharedVfs`](crate::shared::SharedVfs), which serializes the two.
///
/// The letter space is tiny, so lookup is a linear scan.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<RegisteredDriver>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `driver` under `letter`.
    pub fn register(&mut self, letter: char, driver: Box<dyn VfsDriver>) -> VfsResult<()> {
        if self.is_registered(letter) {
            return Err(VfsError::DuplicateDriver(letter));
        }
        self.drivers.push(RegisteredDriver { letter, driver });
        Ok(())
    }

    /// Look up the driver registered under `letter`.
    pub fn lookup(&self, letter: char) -> VfsResult<&dyn VfsDriver> {
        self.drivers
            .iter()
            .find(|d| d.letter == letter)
            .map(|d| d.driver.as_ref())
            .ok_or(VfsError::UnknownDriver(letter))
    }

    /// Check whether a driver is registered under `letter`.
    pub fn is_registered(&self, letter: char) -> bool {
        self.drivers.iter().any(|d| d.letter == letter)
    }

    /// Registered drive letters, in registration order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.drivers.iter().map(|d| d.letter)
    }
}
