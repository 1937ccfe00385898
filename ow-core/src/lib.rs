//! owneo Core Library
//!
//! Classifies 1-Wire devices by family and feature, selects the properties
//! worth tracking and keeps a persistent model of sensors and their values
//! in sync with the bus.
//!
//! # Module Structure
//!
//! - `features/` - family catalog, property name patterns, selection
//! - `model/` - sensor and property records, status and value types
//! - `client/` - sensor network clients (owfs mount, in-memory bus)
//! - `engine/` - registry and refresh cycle
//!
//! # Example
//!
//! ```no_run
//! use ow_core::{parse_features, Engine};
//!
//! let desired = parse_features(["temperature", "humidity"]).unwrap();
//! let mut engine = Engine::connect("/mnt/1wire", desired).unwrap();
//! engine.refresh().unwrap();
//! for sensor in engine.sensors() {
//!     println!("{} {}", sensor.id(), sensor.status());
//! }
//! ```

// Grouped modules
pub mod client;
pub mod engine;
pub mod features;
pub mod model;

// Standalone modules
pub mod constants;
pub mod display;
pub mod error;

pub use client::{DeviceHandle, Entry, MemoryBus, OwfsMountClient, SensorNetworkClient};
pub use engine::{Engine, RefreshSummary, Registry};
pub use error::{OwError, Result};
pub use features::{
    family_code_of, parse_features, FamilyCatalog, FamilyDescriptor, Feature,
    FeatureClassifier, FeatureSet, PatternMatcher,
};
pub use model::{
    PropertyKind, PropertyRecord, PropertyStatus, PropertyValue, RawProperties, RawValue,
    SensorRecord, SensorStatus,
};
