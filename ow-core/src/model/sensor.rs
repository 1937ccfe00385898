//! Sensor state tracking

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use super::{PropertyRecord, PropertyStatus, SensorStatus};
use crate::client::{flatten_properties, DeviceHandle, SensorNetworkClient};
use crate::constants::paths::SEPARATOR;
use crate::error::Result;
use crate::features::{FeatureClassifier, FeatureSet};

/// State of one device on the bus and all of its tracked properties
#[derive(Debug, Clone, Serialize)]
pub struct SensorRecord {
    id: String,
    path: String,
    description: &'static str,
    status: SensorStatus,
    properties: BTreeMap<String, PropertyRecord>,
    last_read_at: Option<DateTime<Local>>,
}

impl SensorRecord {
    /// A freshly admitted sensor. Properties are filled in by [`update`](Self::update).
    pub fn new(handle: &DeviceHandle, classifier: &FeatureClassifier) -> Self {
        Self {
            id: handle.path.trim_matches(SEPARATOR).to_string(),
            path: handle.path.clone(),
            description: classifier.describe(&handle.path),
            status: SensorStatus::New,
            properties: BTreeMap::new(),
            last_read_at: None,
        }
    }

    /// Re-read the sensor's relevant properties.
    ///
    /// Returns how many properties changed value or appeared. If the property
    /// tree cannot be listed the records are left untouched.
    pub fn update<C>(
        &mut self,
        client: &C,
        classifier: &FeatureClassifier,
        desired: &FeatureSet,
    ) -> Result<usize>
    where
        C: SensorNetworkClient + ?Sized,
    {
        let handle = DeviceHandle::new(self.path.clone());
        let flat = flatten_properties(client, &handle)?;
        let writable: HashMap<&str, bool> =
            flat.iter().map(|p| (p.name.as_str(), p.writable)).collect();
        let selected = classifier.select_names(flat.iter().map(|p| p.name.as_str()), desired);
        debug!(
            sensor = %self.id,
            listed = flat.len(),
            selected = selected.len(),
            "Filtered property list"
        );

        let mut changed = 0;
        for name in &selected {
            let full_path = format!("{}{}", self.path, name);
            let reading = client.read_property(&full_path);

            let status = match self.properties.get_mut(name) {
                Some(property) => {
                    property.observe(reading);
                    property.status()
                }
                None => {
                    let kind = classifier.kind_for(name);
                    let is_writable = writable.get(name.as_str()).copied().unwrap_or(false);
                    let property = PropertyRecord::new(full_path, name.clone(), kind, is_writable, reading);
                    let status = property.status();
                    self.properties.insert(name.clone(), property);
                    status
                }
            };

            if matches!(
                status,
                PropertyStatus::New
                    | PropertyStatus::Changed
                    | PropertyStatus::Increased
                    | PropertyStatus::Decreased
            ) {
                changed += 1;
            }
        }

        for (name, property) in self.properties.iter_mut() {
            if !selected.contains(name) {
                property.mark_missing();
            }
        }

        self.last_read_at = Some(Local::now());
        Ok(changed)
    }

    pub fn mark_available(&mut self) {
        self.status = SensorStatus::Available;
    }

    /// The device is gone from the bus. Its properties are kept as they were.
    pub fn mark_missing(&mut self) {
        self.status = SensorStatus::Missing;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    pub fn last_read_at(&self) -> Option<DateTime<Local>> {
        self.last_read_at
    }

    /// Properties sorted by name
    pub fn properties(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyRecord> {
        self.properties.get(name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
