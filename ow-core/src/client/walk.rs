//! Flatten a device's property tree into relative names
//!
//! Iterative so deeply nested devices cannot exhaust the call stack.
//! Nested properties are prefixed with their directory relative to the
//! device, e.g. `pages/page.0` or `TAI8570/temperature`.

use tracing::trace;

use super::{DeviceHandle, Entry, SensorNetworkClient};
use crate::error::Result;

/// Leaf property found below a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatProperty {
    pub name: String,
    pub writable: bool,
}

/// Walk every directory below `device` and collect its leaf properties
pub fn flatten_properties<C>(client: &C, device: &DeviceHandle) -> Result<Vec<FlatProperty>>
where
    C: SensorNetworkClient + ?Sized,
{
    let mut properties = Vec::new();
    let mut pending = vec![device.clone()];

    while let Some(dir) = pending.pop() {
        let prefix = dir.path.strip_prefix(device.path.as_str()).unwrap_or("");
        trace!(device = %device.path, prefix = %prefix, "Listing property directory");

        for entry in client.list_entries(&dir)? {
            match entry {
                Entry::Directory(child) => pending.push(child),
                Entry::Property { name, writable } => properties.push(FlatProperty {
                    name: format!("{}{}", prefix, name),
                    writable,
                }),
            }
        }
    }

    Ok(properties)
}
