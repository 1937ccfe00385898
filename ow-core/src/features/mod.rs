//! Feature classification
//!
//! Maps 1-Wire family codes to declared features, matches raw property
//! names against per-feature patterns, and decides which devices and
//! properties are worth tracking.
//!
//! # Module Structure
//!
//! - `family` - static family code table and lookups
//! - `patterns` - compiled per-feature property name patterns
//! - `selector` - identity + feature based property selection
//! - `classifier` - device level "is this sensor desired" decisions

mod classifier;
mod family;
mod patterns;
mod selector;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OwError;

pub use classifier::FeatureClassifier;
pub use family::{family_code_of, FamilyCatalog, FamilyDescriptor};
pub use patterns::{PatternMatcher, FEATURE_PATTERNS};
pub use selector::{select_attributes, select_names};

/// Capability category a device family may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Temperature,
    Humidity,
    Pressure,
    Counter,
    Voltage,
    Current,
    Sense,
    Pio,
    Memory,
    Clock,
    Illumination,
    #[serde(rename = "uv")]
    UV,
    #[serde(rename = "co2")]
    CO2,
    #[serde(rename = "lcd")]
    LCD,
}

/// Set of features, ordered by declaration
pub type FeatureSet = BTreeSet<Feature>;

impl Feature {
    /// Every feature, in declaration order
    pub const ALL: [Feature; 14] = [
        Feature::Temperature,
        Feature::Humidity,
        Feature::Pressure,
        Feature::Counter,
        Feature::Voltage,
        Feature::Current,
        Feature::Sense,
        Feature::Pio,
        Feature::Memory,
        Feature::Clock,
        Feature::Illumination,
        Feature::UV,
        Feature::CO2,
        Feature::LCD,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
            Feature::Pressure => "Pressure",
            Feature::Counter => "Counter",
            Feature::Voltage => "Voltage",
            Feature::Current => "Current",
            Feature::Sense => "Sense",
            Feature::Pio => "Pio",
            Feature::Memory => "Memory",
            Feature::Clock => "Clock",
            Feature::Illumination => "Illumination",
            Feature::UV => "UV",
            Feature::CO2 => "CO2",
            Feature::LCD => "LCD",
        }
    }

    /// Canonical property name for this feature, where owfs has one.
    pub fn default_property(&self) -> Option<&'static str> {
        match self {
            Feature::Temperature => Some("temperature"),
            Feature::Humidity => Some("humidity"),
            Feature::Pressure => Some("pressure"),
            Feature::Counter => Some("counter"),
            Feature::Voltage => Some("voltage"),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = OwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OwError::UnknownFeature(s.to_string()))
    }
}

/// Parse a list of feature names into a set
pub fn parse_features<I, S>(names: I) -> Result<FeatureSet, OwError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|name| name.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("temperature".parse::<Feature>().unwrap(), Feature::Temperature);
        assert_eq!("UV".parse::<Feature>().unwrap(), Feature::UV);
        assert_eq!(" co2 ".parse::<Feature>().unwrap(), Feature::CO2);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "radiation".parse::<Feature>().unwrap_err();
        assert!(matches!(err, OwError::UnknownFeature(name) if name == "radiation"));
    }

    #[test]
    fn test_parse_features_set() {
        let set = parse_features(["Humidity", "temperature", "humidity"]).unwrap();
        let listed: Vec<_> = set.into_iter().collect();
        assert_eq!(listed, vec![Feature::Temperature, Feature::Humidity]);
    }

    #[test]
    fn test_default_property() {
        assert_eq!(Feature::Voltage.default_property(), Some("voltage"));
        assert_eq!(Feature::Memory.default_property(), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Feature::CO2).unwrap(), "\"co2\"");
        let parsed: Feature = serde_json::from_str("\"illumination\"").unwrap();
        assert_eq!(parsed, Feature::Illumination);
    }
}
