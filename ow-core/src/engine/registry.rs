//! Registry of tracked sensors and the reconciliation pass

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{DeviceHandle, SensorNetworkClient};
use crate::features::{FeatureClassifier, FeatureSet};
use crate::model::{SensorRecord, SensorStatus};

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Sensors admitted for the first time
    pub added: usize,
    /// Previously missing sensors seen again
    pub returned: usize,
    /// Sensors that went missing this pass
    pub missing: usize,
    /// Devices on the bus that do not expose a desired feature
    pub skipped: usize,
    /// Properties that appeared or changed value
    pub changed_properties: usize,
    /// Sensors whose property tree could not be read
    pub failed: usize,
}

/// All sensors ever admitted, keyed by bus path
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    address: String,
    desired: FeatureSet,
    sensors: BTreeMap<String, SensorRecord>,
}

impl Registry {
    pub fn new(address: impl Into<String>, desired: FeatureSet) -> Self {
        Self {
            address: address.into(),
            desired,
            sensors: BTreeMap::new(),
        }
    }

    /// Fold a complete device enumeration into the registry.
    ///
    /// Known sensors are updated without re-checking the feature filter.
    /// Unknown ones are admitted only if desired. Known paths absent from
    /// `observed` are marked missing and retained.
    pub fn reconcile<C>(
        &mut self,
        observed: &[DeviceHandle],
        client: &C,
        classifier: &FeatureClassifier,
    ) -> RefreshSummary
    where
        C: SensorNetworkClient + ?Sized,
    {
        let mut summary = RefreshSummary::default();
        let mut unseen: BTreeSet<String> = self.sensors.keys().cloned().collect();

        for handle in observed {
            let path = handle.path.as_str();
            let known = self.sensors.contains_key(path);
            unseen.remove(path);
            if !known {
                if !classifier.is_desired(path, &self.desired) {
                    debug!(path = %path, "Skipping sensor without desired features");
                    summary.skipped += 1;
                    continue;
                }
                debug!(path = %path, "Found new sensor");
                summary.added += 1;
                self.sensors
                    .insert(path.to_string(), SensorRecord::new(handle, classifier));
            }

            let Some(sensor) = self.sensors.get_mut(path) else {
                continue;
            };
            if known {
                if sensor.status() == SensorStatus::Missing {
                    debug!(sensor = %sensor.id(), "Sensor returned");
                    summary.returned += 1;
                }
                sensor.mark_available();
            }

            match sensor.update(client, classifier, &self.desired) {
                Ok(changed) => summary.changed_properties += changed,
                Err(e) => {
                    warn!(sensor = %sensor.id(), error = %e, "Failed to read sensor properties");
                    summary.failed += 1;
                }
            }
        }

        for path in unseen {
            if let Some(sensor) = self.sensors.get_mut(&path) {
                if sensor.status() != SensorStatus::Missing {
                    warn!(sensor = %sensor.id(), "Sensor went missing");
                    summary.missing += 1;
                }
                sensor.mark_missing();
            }
        }

        summary
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn desired_features(&self) -> &FeatureSet {
        &self.desired
    }

    /// Sensors sorted by id
    pub fn sensors(&self) -> Vec<&SensorRecord> {
        let mut sensors: Vec<_> = self.sensors.values().collect();
        sensors.sort_by(|a, b| a.id().cmp(b.id()));
        sensors
    }

    pub fn sensor(&self, path: &str) -> Option<&SensorRecord> {
        self.sensors.get(path)
    }

    /// Look a sensor up by bus path or bare id
    pub fn find(&self, path_or_id: &str) -> Option<&SensorRecord> {
        self.sensors
            .get(path_or_id)
            .or_else(|| self.sensors.values().find(|s| s.id() == path_or_id))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
