//! Property state tracking
//!
//! A property keeps exactly one previous value. Every observation compares
//! against it and records the outcome as a [`PropertyStatus`].

use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};

use super::{PropertyKind, PropertyStatus, PropertyValue, RawValue};
use crate::error::Result;

/// State of a single property on a sensor
#[derive(Debug, Clone, Serialize)]
pub struct PropertyRecord {
    full_path: String,
    name: String,
    kind: PropertyKind,
    writable: bool,
    value: Option<PropertyValue>,
    status: PropertyStatus,
    last_read_at: Option<DateTime<Local>>,
}

impl PropertyRecord {
    /// Create a record from its first reading.
    ///
    /// A failed or uninterpretable first reading leaves the value unset and
    /// the status `Indeterminate`.
    pub fn new(
        full_path: impl Into<String>,
        name: impl Into<String>,
        kind: PropertyKind,
        writable: bool,
        reading: Result<RawValue>,
    ) -> Self {
        let mut record = Self {
            full_path: full_path.into(),
            name: name.into(),
            kind,
            writable,
            value: None,
            status: PropertyStatus::New,
            last_read_at: None,
        };
        record.apply(reading);
        if record.value.is_some() {
            record.status = PropertyStatus::New;
        }
        record
    }

    /// Fold a fresh reading into the record
    pub fn observe(&mut self, reading: Result<RawValue>) {
        self.status = PropertyStatus::Indeterminate;
        self.apply(reading);
    }

    /// The property was not listed this cycle. Its value is kept.
    pub fn mark_missing(&mut self) {
        if self.status != PropertyStatus::Missing {
            debug!(property = %self.full_path, "Property went missing");
        }
        self.status = PropertyStatus::Missing;
    }

    fn apply(&mut self, reading: Result<RawValue>) {
        let raw = match reading {
            Ok(raw) => raw,
            Err(e) => {
                warn!(property = %self.full_path, error = %e, "Property read failed");
                self.status = PropertyStatus::Indeterminate;
                return;
            }
        };

        self.status = match self.kind {
            PropertyKind::Numeric => self.apply_numeric(raw),
            PropertyKind::Binary => self.replace(PropertyValue::Bytes(raw.into_bytes())),
            _ => self.replace(PropertyValue::Text(raw.into_text().trim().to_string())),
        };
        self.last_read_at = Some(Local::now());
    }

    fn apply_numeric(&mut self, raw: RawValue) -> PropertyStatus {
        let text = raw.into_text();
        let parsed = match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!(property = %self.full_path, value = %text, "Numeric property did not parse");
                return PropertyStatus::Indeterminate;
            }
        };

        let status = match &self.value {
            Some(PropertyValue::Numeric(previous)) => match parsed.partial_cmp(previous) {
                Some(Ordering::Equal) => PropertyStatus::Stable,
                Some(Ordering::Less) => PropertyStatus::Decreased,
                Some(Ordering::Greater) => PropertyStatus::Increased,
                None => PropertyStatus::Changed,
            },
            _ => PropertyStatus::Changed,
        };
        self.value = Some(PropertyValue::Numeric(parsed));
        status
    }

    fn replace(&mut self, value: PropertyValue) -> PropertyStatus {
        let status = if self.value.as_ref() == Some(&value) {
            PropertyStatus::Stable
        } else {
            PropertyStatus::Changed
        };
        self.value = Some(value);
        status
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn value(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    pub fn status(&self) -> PropertyStatus {
        self.status
    }

    pub fn last_read_at(&self) -> Option<DateTime<Local>> {
        self.last_read_at
    }
}
