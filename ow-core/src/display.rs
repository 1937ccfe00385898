//! Display formatting helpers
//!
//! Frontend agnostic rendering of property values, timestamps and status
//! lines. Used by the CLI report and usable by any other frontend.

use chrono::{DateTime, Local};

use crate::model::{PropertyRecord, PropertyValue, SensorRecord};

/// Placeholder for a value or timestamp that was never read
pub const UNSET: &str = "-";

/// Timestamp layout used in reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a stored value. Binary values render as upper-case hex.
pub fn format_value(value: Option<&PropertyValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => UNSET.to_string(),
    }
}

/// Format a read timestamp in local time
pub fn format_timestamp(at: Option<DateTime<Local>>) -> String {
    match at {
        Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        None => UNSET.to_string(),
    }
}

/// One line per sensor: id, family description, status, last read
pub fn sensor_line(sensor: &SensorRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        sensor.id(),
        sensor.description(),
        sensor.status(),
        format_timestamp(sensor.last_read_at())
    )
}

/// One line per property: glyph, name and value
pub fn property_line(property: &PropertyRecord) -> String {
    format!(
        "  {} {} = {}",
        property.status().glyph(),
        property.name(),
        format_value(property.value())
    )
}
