//! 1-Wire device families
//!
//! Compiled manually from the owfs family code lookup page. The list is
//! more or less complete but leaves out some of the more esoteric features
//! of individual slave devices.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::{Feature, FeatureSet};
use crate::constants::{family, paths};

use Feature::*;

/// Family code table: (code, description, declared features)
const FAMILIES: &[(&str, &str, &[Feature])] = &[
    ("01", "ID Only Tag", &[]),
    ("02", "Memory Button", &[Memory]),
    ("04", "Real Time Clock", &[Memory, Clock, Counter]),
    ("05", "Addressable Switch", &[Pio, Sense]),
    ("06", "Memory Button", &[Memory]),
    ("08", "Memory Button", &[Memory]),
    ("09", "Memory Button", &[Memory]),
    ("0A", "Memory Button", &[Memory]),
    ("0B", "Memory Button", &[Memory]),
    ("0C", "Memory Button", &[Memory]),
    ("0F", "Memory Button", &[Memory]),
    ("10", "High Precision Digital Thermometer", &[Temperature]),
    ("12", "Dual Addressable Switch", &[Temperature, Pressure, Voltage, Sense, Pio, Memory]),
    ("14", "Quad A/D Converter", &[Memory]),
    ("18", "Monetary Button with SHA-1", &[Memory]),
    ("1B", "Battery ID/Monitor", &[Temperature, Voltage, Counter]),
    ("1C", "EEPROM with Address Inputs", &[Sense, Pio, Memory]),
    ("1D", "RAM with Counter", &[Memory, Counter]),
    ("1E", "Smart Battery Monitor", &[Temperature, Clock, Voltage]),
    ("1F", "MicroLAN Coupler", &[]),
    ("20", "Quad A/D Converter", &[Temperature, Voltage]),
    ("21", "Thermachron Temperature Logging iButton", &[Temperature, Clock]),
    ("22", "Economy Digital Thermometer", &[Temperature]),
    ("23", "EEPROM", &[Memory]),
    ("24", "Real Time Clock", &[Clock]),
    ("26", "Smart Battery Monitor", &[Temperature, Pressure, Voltage, Humidity, Clock, Illumination]),
    ("27", "Time Chip", &[Clock]),
    ("28", "Programmable Resolution Digital Thermometer", &[Temperature]),
    ("29", "8 Channel Addressable Switch", &[Pio, Sense, LCD]),
    ("2C", "Digital Potentiometer", &[]),
    ("2D", "EEPROM", &[Memory]),
    ("2E", "Battery Monitor and Charge Controller", &[Temperature, Voltage, Current, Sense, Pio]),
    ("30", "Hi-Precision Li+ Battery Monitor", &[Temperature, Voltage, Current, Sense, Pio]),
    ("35", "Multi-Chemistry Battery Fuel Gauge", &[Temperature, Voltage, Current, Sense, Pio]),
    ("36", "High-Precision Columb Counter", &[Voltage, Sense, Pio]),
    ("37", "Password Protected Memory Button", &[Memory]),
    ("3A", "Dual Channel Addressable Switch", &[Sense, Pio]),
    ("3B", "Digital Thermometer with ID", &[Temperature]),
    ("3D", "Stand-Alone Fuel Gauge", &[Temperature, Voltage, Current, Sense, Pio]),
    ("42", "Digital Thermometer with Sequence Detect and PIO", &[Temperature, Sense, Pio]),
    ("43", "EEPROM", &[Memory]),
    ("51", "Multi-Chemistry Battery Fuel Gauge", &[Temperature, Voltage, Current, Sense, Pio]),
    ("EE", "HobbyBoards Microprocessor-Based Slave with Temperature", &[Temperature, UV]),
    ("EF", "HobbyBoards Microprocessor-Based Slave", &[UV]),
];

/// A single family of 1-Wire devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyDescriptor {
    pub family_code: &'static str,
    pub description: &'static str,
    pub features: FeatureSet,
}

impl FamilyDescriptor {
    fn new(family_code: &'static str, description: &'static str, features: &[Feature]) -> Self {
        Self {
            family_code,
            description,
            features: features.iter().copied().collect(),
        }
    }

    /// True for the "unknown family" sentinel
    pub fn is_unknown(&self) -> bool {
        self.family_code == family::UNKNOWN_CODE
    }
}

impl fmt::Display for FamilyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let features: Vec<&str> = self.features.iter().map(Feature::name).collect();
        write!(
            f,
            "{}: Family Code: {}, Features: [{}]",
            self.description,
            self.family_code,
            features.join(", ")
        )
    }
}

/// Extract the family code from a raw device id or path.
///
/// `"/10.5D4470010800/"` yields `Some("10")`. Ids without a `.` separator
/// have no family code.
pub fn family_code_of(sensor_id: &str) -> Option<&str> {
    sensor_id
        .trim_matches(paths::SEPARATOR)
        .split_once(family::CODE_SEPARATOR)
        .map(|(code, _)| code.trim_matches(paths::SEPARATOR))
}

/// Lookup table from family code to descriptor
#[derive(Debug, Clone)]
pub struct FamilyCatalog {
    families: HashMap<&'static str, FamilyDescriptor>,
    unknown: FamilyDescriptor,
}

impl FamilyCatalog {
    pub fn new() -> Self {
        let families = FAMILIES
            .iter()
            .map(|(code, description, features)| {
                (*code, FamilyDescriptor::new(code, description, features))
            })
            .collect();

        Self {
            families,
            unknown: FamilyDescriptor::new(family::UNKNOWN_CODE, family::UNKNOWN_DESCRIPTION, &[]),
        }
    }

    /// Exact lookup; unknown codes resolve to the sentinel.
    pub fn lookup(&self, family_code: &str) -> &FamilyDescriptor {
        self.families.get(family_code).unwrap_or(&self.unknown)
    }

    /// Descriptor for the family a device id belongs to
    pub fn family_of(&self, sensor_id: &str) -> &FamilyDescriptor {
        match family_code_of(sensor_id) {
            Some(code) => self.lookup(code),
            None => &self.unknown,
        }
    }

    /// Human readable description of a device's family
    pub fn describe(&self, sensor_id: &str) -> &'static str {
        self.family_of(sensor_id).description
    }

    /// All known families sorted by code, sentinel excluded
    pub fn families(&self) -> Vec<&FamilyDescriptor> {
        let mut all: Vec<_> = self.families.values().collect();
        all.sort_by_key(|f| f.family_code);
        all
    }
}

impl Default for FamilyCatalog {
    fn default() -> Self {
        Self::new()
    }
}
