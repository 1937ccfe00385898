//! Sensor network clients
//!
//! The engine only needs to enumerate devices, list a directory's entries
//! and read or write a property by its full path.
//!
//! - `owfs` - a mounted owfs FUSE tree
//! - `memory` - an in-memory bus for tests and demos

mod memory;
mod owfs;
mod walk;

use crate::error::Result;
use crate::model::RawValue;

pub use memory::MemoryBus;
pub use owfs::OwfsMountClient;
pub use walk::{flatten_properties, FlatProperty};

/// A device or sub-directory on the bus.
///
/// Paths are absolute with a trailing separator, e.g. `/10.147A0A020800/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    pub path: String,
}

impl DeviceHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Handle of a sub-directory below this one
    pub fn child(&self, name: &str) -> Self {
        Self::new(format!("{}{}/", self.path, name))
    }
}

/// Direct child of a device or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory(DeviceHandle),
    Property { name: String, writable: bool },
}

/// Minimal contract of a 1-Wire sensor network session
#[cfg_attr(test, mockall::automock)]
pub trait SensorNetworkClient {
    /// Address the session was opened against
    fn address(&self) -> &str;

    /// All devices currently on the bus
    fn enumerate_devices(&self) -> Result<Vec<DeviceHandle>>;

    /// Direct children of a device or sub-directory
    fn list_entries(&self, handle: &DeviceHandle) -> Result<Vec<Entry>>;

    /// Current raw value of a property
    fn read_property(&self, full_path: &str) -> Result<RawValue>;

    /// Write a raw value to a property
    fn write_property(&self, full_path: &str, value: &str) -> Result<()>;
}
