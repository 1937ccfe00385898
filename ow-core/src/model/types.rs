//! Core data types for owneo
//!
//! Status and kind enumerations, raw values as read off the bus, and
//! interpreted property values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::features::Feature;

/// Kind of value a property holds. Fixed when the property is first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyKind {
    Numeric,
    String,
    Timestamp,
    Boolean,
    Binary,
}

impl PropertyKind {
    pub fn for_feature(feature: Option<Feature>) -> Self {
        match feature {
            Some(Feature::Memory) => PropertyKind::Binary,
            Some(Feature::Clock) => PropertyKind::Timestamp,
            Some(Feature::Sense) | Some(Feature::Pio) => PropertyKind::String,
            Some(_) => PropertyKind::Numeric,
            None => PropertyKind::String,
        }
    }
}

/// Change status of a property relative to its previous reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyStatus {
    New,
    Indeterminate,
    Decreased,
    Stable,
    Increased,
    Changed,
    Missing,
}

impl PropertyStatus {
    /// Single character used in status reports
    pub fn glyph(&self) -> char {
        match self {
            PropertyStatus::New => 'n',
            PropertyStatus::Indeterminate => '?',
            PropertyStatus::Stable => '=',
            PropertyStatus::Changed => '~',
            PropertyStatus::Increased => '+',
            PropertyStatus::Decreased => '-',
            PropertyStatus::Missing => '!',
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Presence of a sensor across polling cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorStatus {
    New,
    Available,
    Missing,
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A value exactly as the sensor network returned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Interpret raw bytes: valid UTF-8 becomes text, left untouched.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => RawValue::Text(text),
            Err(e) => RawValue::Bytes(e.into_bytes()),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RawValue::Text(text) => text.into_bytes(),
            RawValue::Bytes(bytes) => bytes,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(bytes: Vec<u8>) -> Self {
        RawValue::Bytes(bytes)
    }
}

/// Name to raw value mapping for one device.
///
/// Membership is exact; `get_ignore_case` gives the case-insensitive view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperties {
    entries: BTreeMap<String, RawValue>,
}

impl RawProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries.get(name)
    }

    pub fn get_ignore_case(&self, name: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Interpreted property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Numeric(f64),
    Text(String),
    #[serde(serialize_with = "serialize_hex")]
    Bytes(Vec<u8>),
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Numeric(v) => write!(f, "{}", v),
            PropertyValue::Text(text) => f.write_str(text),
            PropertyValue::Bytes(bytes) => f.write_str(&hex::encode_upper(bytes)),
        }
    }
}
