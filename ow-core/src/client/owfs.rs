//! owfs FUSE mount client
//!
//! owfs exposes every device on the bus as a top level directory named by
//! its id (`10.147A0A020800`). Properties are files; nested namespaces such
//! as `pages/` or `TAI8570/` are sub-directories. Alongside the devices the
//! mount also carries housekeeping directories (`bus.0`, `uncached`,
//! `settings`, `statistics`, ...), which are skipped.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, trace};

use super::{DeviceHandle, Entry, SensorNetworkClient};
use crate::constants::paths::SEPARATOR;
use crate::error::{OwError, Result};
use crate::model::RawValue;

const DEVICE_DIR_PATTERN: &str = r"(?i)^[0-9A-F]{2}\.[0-9A-F]+$";

/// Any write bit set
const WRITE_BITS: u32 = 0o222;

#[derive(Debug)]
pub struct OwfsMountClient {
    address: String,
    root: PathBuf,
    device_dir: Regex,
}

impl OwfsMountClient {
    /// Open a session on a mounted owfs tree
    pub fn connect(address: &str) -> Result<Self> {
        let root = PathBuf::from(address);
        let meta = fs::metadata(&root)
            .map_err(|e| OwError::connection(address, e.to_string()))?;
        if !meta.is_dir() {
            return Err(OwError::connection(address, "not a directory"));
        }
        let device_dir = Regex::new(DEVICE_DIR_PATTERN)
            .map_err(|e| OwError::connection(address, e.to_string()))?;

        info!(address = %address, "Connected to owfs mount");
        Ok(Self {
            address: address.to_string(),
            root,
            device_dir,
        })
    }

    fn resolve(&self, bus_path: &str) -> PathBuf {
        self.root.join(bus_path.trim_start_matches(SEPARATOR))
    }
}

fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().mode() & WRITE_BITS != 0)
        .unwrap_or(false)
}

impl SensorNetworkClient for OwfsMountClient {
    fn address(&self) -> &str {
        &self.address
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceHandle>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| OwError::Enumeration(format!("{}: {}", self.root.display(), e)))?;

        let mut devices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OwError::Enumeration(e.to_string()))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !entry.path().is_dir() || !self.device_dir.is_match(&name) {
                trace!(entry = %name, "Skipping non-device entry");
                continue;
            }
            devices.push(DeviceHandle::new(format!("{}{}{}", SEPARATOR, name, SEPARATOR)));
        }

        devices.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(count = devices.len(), "Enumerated owfs devices");
        Ok(devices)
    }

    fn list_entries(&self, handle: &DeviceHandle) -> Result<Vec<Entry>> {
        let dir = self.resolve(&handle.path);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if path.is_dir() {
                entries.push(Entry::Directory(handle.child(&name)));
            } else {
                entries.push(Entry::Property {
                    writable: is_writable(&path),
                    name,
                });
            }
        }

        Ok(entries)
    }

    fn read_property(&self, full_path: &str) -> Result<RawValue> {
        fs::read(self.resolve(full_path))
            .map(RawValue::from_bytes)
            .map_err(|e| OwError::property_read(full_path, e.to_string()))
    }

    fn write_property(&self, full_path: &str, value: &str) -> Result<()> {
        fs::write(self.resolve(full_path), value)
            .map_err(|e| OwError::property_write(full_path, e.to_string()))
    }
}
