//! Synchronization engine
//!
//! Owns the client session, the classifier and the registry. Each
//! [`Engine::refresh`] enumerates the bus once and folds the result into the
//! registry.

mod registry;

pub use registry::{RefreshSummary, Registry};

use tracing::{debug, info, warn};

use crate::client::{OwfsMountClient, SensorNetworkClient};
use crate::error::{OwError, Result};
use crate::features::{FeatureClassifier, FeatureSet};
use crate::model::SensorRecord;

pub struct Engine<C: SensorNetworkClient> {
    client: C,
    classifier: FeatureClassifier,
    registry: Registry,
    connected: bool,
}

impl Engine<OwfsMountClient> {
    /// Open an owfs mount and run the first refresh
    pub fn connect(address: &str, desired: FeatureSet) -> Result<Self> {
        let client = OwfsMountClient::connect(address)?;
        Self::with_client(client, desired)
    }
}

impl<C: SensorNetworkClient> Engine<C> {
    /// Build an engine over an established client and run the first refresh.
    ///
    /// Fails only if the pattern table does not compile. A failed first
    /// enumeration leaves the engine empty and not connected.
    pub fn with_client(client: C, desired: FeatureSet) -> Result<Self> {
        let classifier = FeatureClassifier::builtin()?;
        let registry = Registry::new(client.address(), desired);
        let mut engine = Self {
            client,
            classifier,
            registry,
            connected: false,
        };

        if let Err(e) = engine.refresh() {
            warn!(address = %engine.registry.address(), error = %e, "Initial refresh failed");
        }
        Ok(engine)
    }

    /// Run one reconciliation pass.
    ///
    /// If enumeration fails the registry is left exactly as it was.
    pub fn refresh(&mut self) -> Result<RefreshSummary> {
        debug!(address = %self.registry.address(), "Refreshing sensors");
        let observed = self.client.enumerate_devices()?;
        self.connected = true;

        let summary = self
            .registry
            .reconcile(&observed, &self.client, &self.classifier);
        info!(
            sensors = self.registry.len(),
            added = summary.added,
            returned = summary.returned,
            missing = summary.missing,
            changed = summary.changed_properties,
            "Refresh complete"
        );
        Ok(summary)
    }

    /// Write a raw value to one property of a tracked sensor.
    ///
    /// The stored value is not touched; the next refresh reads it back.
    pub fn write_property(&self, sensor: &str, name: &str, value: &str) -> Result<()> {
        let record = self
            .registry
            .find(sensor)
            .ok_or_else(|| OwError::SensorNotFound(sensor.to_string()))?;
        let property = record.property(name).ok_or_else(|| OwError::PropertyNotFound {
            sensor: record.id().to_string(),
            name: name.to_string(),
        })?;
        if !property.is_writable() {
            return Err(OwError::NotWritable(property.full_path().to_string()));
        }

        self.client.write_property(property.full_path(), value)?;
        info!(property = %property.full_path(), value = %value, "Wrote property");
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tracked sensors sorted by id
    pub fn sensors(&self) -> Vec<&SensorRecord> {
        self.registry.sensors()
    }

    pub fn sensor(&self, path_or_id: &str) -> Option<&SensorRecord> {
        self.registry.find(path_or_id)
    }

    pub fn address(&self) -> &str {
        self.registry.address()
    }

    pub fn desired_features(&self) -> &FeatureSet {
        self.registry.desired_features()
    }

    /// Whether any enumeration has succeeded
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn classifier(&self) -> &FeatureClassifier {
        &self.classifier
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
