//! Property name patterns per feature
//!
//! Property names emitted by real devices drift in case, nesting and
//! sibling-device prefixes. This table is the one place where that naming
//! knowledge lives. Patterns are case-insensitive and anchored at the start
//! of the candidate name only, so `temperature` also matches `temperature12`.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::Feature;
use crate::error::{OwError, Result};

/// Declarative pattern table, in lookup order
pub const FEATURE_PATTERNS: &[(Feature, &[&str])] = &[
    (
        Feature::Temperature,
        &[
            r"(TAI8570/)?temperature[\d]?",
            r"fasttemp",
            r"templow",
            r"temphigh",
            r"type[A-Z]/temperature",
        ],
    ),
    (Feature::Humidity, &[r"(HIH4000/)?(HTM1735/)?humidity"]),
    (Feature::Pressure, &[r"(TAI8570/)?(B1-R1-A/)?pressure"]),
    (
        Feature::Counter,
        &[
            r"counter(s)?\.[AB]",
            r"counter(s)\.ALL",
            r"(readonly/)?(counter/)?cycle(s)?",
            r"counter",
            r"page(s)?/count(er)?(s?)\.[\d]+",
            r"page(s)?/count(er)?(s)?.ALL",
        ],
    ),
    (
        Feature::Voltage,
        &[
            r"(8bit/)?volt(s)?(2)?",
            r"(8bit/)?(T8A/)?volt(2)?\.[a-z,0-9]",
            r"(8bit/)?(T8A/)?volt(2)?\.all",
            r"V[AD]D",
            r"vbias",
            r"vis",
            r"volthours",
        ],
    ),
    (Feature::Current, &[r"current", r"amphours"]),
    (Feature::Sense, &[r"sensed", r"sensed\.[a-z]", r"sensed\.all", r"sensed\.byte"]),
    (Feature::Pio, &[r"pio", r"pio\.[a-z]", r"pio\.all", r"pio\.byte", r"branch"]),
    (
        Feature::Memory,
        &[
            r"application",
            r"memory",
            r"page\.ALL",
            r"page\.[\d]+",
            r"pages/page\.[\d]+",
            r"pages/page\.ALL",
        ],
    ),
    (
        Feature::Clock,
        &[
            r"(u)?date",
            r"readonly/clock",
            r"disconnect/(u)?date",
            r"endcharge/(u)?date",
            r"clock/(u)?date",
        ],
    ),
    (Feature::Illumination, &[r"S3-R1-A/(illumination)?(current)?(gain)?"]),
    (Feature::UV, &[r"uvi/uvi", r"uvi/uvi-offset", r"uvi/in_case", r"uvi/valid"]),
    (Feature::CO2, &[r"co2/ppm", r"co2/power", r"co2/status"]),
    (Feature::LCD, &[]),
];

/// Compiled, immutable pattern set
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    matchers: Vec<(Feature, Vec<Regex>)>,
}

impl PatternMatcher {
    /// Compile a pattern table. Any malformed pattern fails the whole table.
    pub fn new(table: &[(Feature, &[&str])]) -> Result<Self> {
        let mut matchers = Vec::with_capacity(table.len());

        for (feature, patterns) in table {
            let compiled = patterns
                .iter()
                .map(|pattern| compile(*feature, pattern))
                .collect::<Result<Vec<_>>>()?;
            debug!(feature = %feature, patterns = compiled.len(), "Compiled feature patterns");
            matchers.push((*feature, compiled));
        }

        Ok(Self { matchers })
    }

    /// Compile the built-in owfs table
    pub fn builtin() -> Result<Self> {
        Self::new(FEATURE_PATTERNS)
    }

    /// True if any pattern of `feature` matches `name`
    pub fn matches(&self, feature: Feature, name: &str) -> bool {
        self.matchers
            .iter()
            .filter(|(f, _)| *f == feature)
            .flat_map(|(_, patterns)| patterns.iter())
            .any(|re| re.is_match(name))
    }

    /// First feature in table order whose patterns match `name`
    pub fn feature_for(&self, name: &str) -> Option<Feature> {
        self.matchers
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(name)))
            .map(|(feature, _)| *feature)
    }
}

fn compile(feature: Feature, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(&format!("^(?:{})", pattern))
        .case_insensitive(true)
        .build()
        .map_err(|e| OwError::PatternCompilation {
            feature: feature.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
