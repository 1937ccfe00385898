//! Sensor and property models
//!
//! Records are created on first observation and never deleted; entities
//! that disappear are marked `Missing` and keep their last known values.

mod property;
mod sensor;
mod types;

pub use property::PropertyRecord;
pub use sensor::SensorRecord;
pub use types::{
    PropertyKind, PropertyStatus, PropertyValue, RawProperties, RawValue, SensorStatus,
};
