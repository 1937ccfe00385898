//! In-memory sensor bus
//!
//! Cloned handles share one bus, so a test can hand a clone to the engine
//! and keep mutating devices between refresh cycles.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{DeviceHandle, Entry, SensorNetworkClient};
use crate::error::{OwError, Result};
use crate::model::RawValue;

#[derive(Debug, Clone)]
struct Leaf {
    value: RawValue,
    writable: bool,
}

#[derive(Debug, Default)]
struct BusState {
    devices: BTreeMap<String, BTreeMap<String, Leaf>>,
    failing_reads: HashSet<String>,
    enumeration_fails: bool,
}

impl BusState {
    fn split<'a>(&self, full_path: &'a str) -> Option<(String, &'a str)> {
        self.devices
            .keys()
            .find(|device| full_path.starts_with(device.as_str()))
            .map(|device| (device.clone(), &full_path[device.len()..]))
    }
}

#[derive(Debug, Clone)]
pub struct MemoryBus {
    address: String,
    state: Arc<RwLock<BusState>>,
}

impl MemoryBus {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            state: Arc::new(RwLock::new(BusState::default())),
        }
    }

    /// Add (or replace) a device with read-only properties
    pub fn add_device<I, K, V>(&self, path: &str, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        let leaves = properties
            .into_iter()
            .map(|(name, value)| {
                (name.into(), Leaf { value: value.into(), writable: false })
            })
            .collect();
        self.state.write().devices.insert(path.to_string(), leaves);
    }

    pub fn remove_device(&self, path: &str) {
        self.state.write().devices.remove(path);
    }

    /// Set a property value, creating the property if needed
    pub fn set_value(&self, full_path: &str, value: impl Into<RawValue>) {
        let mut state = self.state.write();
        if let Some((device, name)) = state.split(full_path) {
            let name = name.to_string();
            if let Some(leaves) = state.devices.get_mut(&device) {
                let value = value.into();
                leaves
                    .entry(name)
                    .and_modify(|leaf| leaf.value = value.clone())
                    .or_insert(Leaf { value, writable: false });
            }
        }
    }

    pub fn set_writable(&self, full_path: &str, writable: bool) {
        let mut state = self.state.write();
        if let Some((device, name)) = state.split(full_path) {
            let name = name.to_string();
            if let Some(leaf) = state.devices.get_mut(&device).and_then(|l| l.get_mut(&name)) {
                leaf.writable = writable;
            }
        }
    }

    pub fn remove_property(&self, full_path: &str) {
        let mut state = self.state.write();
        if let Some((device, name)) = state.split(full_path) {
            let name = name.to_string();
            if let Some(leaves) = state.devices.get_mut(&device) {
                leaves.remove(&name);
            }
        }
    }

    /// Make reads of `full_path` fail until cleared
    pub fn fail_reads(&self, full_path: &str, failing: bool) {
        let mut state = self.state.write();
        if failing {
            state.failing_reads.insert(full_path.to_string());
        } else {
            state.failing_reads.remove(full_path);
        }
    }

    pub fn fail_enumeration(&self, failing: bool) {
        self.state.write().enumeration_fails = failing;
    }

    /// Current raw value of a property, bypassing failure injection
    pub fn value(&self, full_path: &str) -> Option<RawValue> {
        let state = self.state.read();
        let (device, name) = state.split(full_path)?;
        state.devices.get(&device)?.get(name).map(|leaf| leaf.value.clone())
    }
}

impl SensorNetworkClient for MemoryBus {
    fn address(&self) -> &str {
        &self.address
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceHandle>> {
        let state = self.state.read();
        if state.enumeration_fails {
            return Err(OwError::Enumeration(format!("bus {} unavailable", self.address)));
        }
        Ok(state.devices.keys().map(DeviceHandle::new).collect())
    }

    fn list_entries(&self, handle: &DeviceHandle) -> Result<Vec<Entry>> {
        let state = self.state.read();
        let (device, dir) = state
            .split(&handle.path)
            .ok_or_else(|| OwError::SensorNotFound(handle.path.clone()))?;
        let leaves = &state.devices[&device];

        let mut subdirs = BTreeSet::new();
        let mut entries = Vec::new();
        for (name, leaf) in leaves {
            let Some(rest) = name.strip_prefix(dir) else { continue };
            match rest.split_once('/') {
                Some((subdir, _)) => {
                    subdirs.insert(subdir.to_string());
                }
                None => entries.push(Entry::Property {
                    name: rest.to_string(),
                    writable: leaf.writable,
                }),
            }
        }
        entries.extend(subdirs.iter().map(|subdir| Entry::Directory(handle.child(subdir))));
        Ok(entries)
    }

    fn read_property(&self, full_path: &str) -> Result<RawValue> {
        let state = self.state.read();
        if state.failing_reads.contains(full_path) {
            return Err(OwError::property_read(full_path, "injected read failure"));
        }
        let (device, name) = state
            .split(full_path)
            .ok_or_else(|| OwError::property_read(full_path, "no such device"))?;
        state
            .devices
            .get(&device)
            .and_then(|leaves| leaves.get(name))
            .map(|leaf| leaf.value.clone())
            .ok_or_else(|| OwError::property_read(full_path, "no such property"))
    }

    fn write_property(&self, full_path: &str, value: &str) -> Result<()> {
        let mut state = self.state.write();
        let (device, name) = state
            .split(full_path)
            .ok_or_else(|| OwError::property_write(full_path, "no such device"))?;
        let leaf = state
            .devices
            .get_mut(&device)
            .and_then(|leaves| leaves.get_mut(name))
            .ok_or_else(|| OwError::property_write(full_path, "no such property"))?;
        if !leaf.writable {
            return Err(OwError::property_write(full_path, "read-only"));
        }
        leaf.value = RawValue::from(value);
        Ok(())
    }
}
