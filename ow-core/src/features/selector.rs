//! Attribute selection
//!
//! Identity properties are always kept. Feature matches are added on top;
//! an empty feature set yields identity only.

use std::collections::{BTreeMap, BTreeSet};

use super::{FeatureSet, PatternMatcher};
use crate::constants::properties::IDENTITY;
use crate::model::{RawProperties, RawValue};

fn is_identity(name: &str) -> bool {
    IDENTITY.iter().any(|id| id.eq_ignore_ascii_case(name))
}

fn is_selected(matcher: &PatternMatcher, name: &str, desired: &FeatureSet) -> bool {
    is_identity(name) || desired.iter().any(|feature| matcher.matches(*feature, name))
}

/// Select from already-fetched properties. Output keys are lowercased.
pub fn select_attributes(
    matcher: &PatternMatcher,
    input: &RawProperties,
    desired: &FeatureSet,
) -> BTreeMap<String, RawValue> {
    input
        .iter()
        .filter(|(name, _)| is_selected(matcher, name, desired))
        .map(|(name, value)| (name.to_lowercase(), value.clone()))
        .collect()
}

/// Select from a list of property names, keeping their original case.
pub fn select_names<I, S>(matcher: &PatternMatcher, names: I, desired: &FeatureSet) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter(|name| is_selected(matcher, name.as_ref(), desired))
        .map(|name| name.as_ref().to_string())
        .collect()
}
