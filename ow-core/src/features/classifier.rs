//! Sensor classification
//!
//! Bundles the family catalog and the compiled patterns into the one
//! object the engine owns. Built once at engine construction.

use std::collections::{BTreeMap, BTreeSet};

use super::{select_attributes, select_names, FamilyCatalog, FamilyDescriptor, FeatureSet, PatternMatcher};
use crate::error::Result;
use crate::model::{PropertyKind, RawProperties, RawValue};

#[derive(Debug, Clone)]
pub struct FeatureClassifier {
    catalog: FamilyCatalog,
    matcher: PatternMatcher,
}

impl FeatureClassifier {
    pub fn new(catalog: FamilyCatalog, matcher: PatternMatcher) -> Self {
        Self { catalog, matcher }
    }

    /// Classifier over the built-in family and pattern tables
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(FamilyCatalog::new(), PatternMatcher::builtin()?))
    }

    pub fn catalog(&self) -> &FamilyCatalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn family_of(&self, sensor_id: &str) -> &FamilyDescriptor {
        self.catalog.family_of(sensor_id)
    }

    pub fn describe(&self, sensor_id: &str) -> &'static str {
        self.catalog.describe(sensor_id)
    }

    /// A device is desired when its family declares at least one of the
    /// requested features. Featureless families never are.
    pub fn is_desired(&self, sensor_id: &str, desired: &FeatureSet) -> bool {
        let family = self.catalog.family_of(sensor_id);
        !family.features.is_empty() && !family.features.is_disjoint(desired)
    }

    pub fn desired_sensors<I, S>(&self, sensor_ids: I, desired: &FeatureSet) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sensor_ids
            .into_iter()
            .filter(|id| self.is_desired(id.as_ref(), desired))
            .map(|id| id.as_ref().to_string())
            .collect()
    }

    pub fn select_attributes(&self, input: &RawProperties, desired: &FeatureSet) -> BTreeMap<String, RawValue> {
        select_attributes(&self.matcher, input, desired)
    }

    pub fn select_names<I, S>(&self, names: I, desired: &FeatureSet) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        select_names(&self.matcher, names, desired)
    }

    /// Kind of value a property holds, derived from the feature its name matches
    pub fn kind_for(&self, name: &str) -> PropertyKind {
        PropertyKind::for_feature(self.matcher.feature_for(name))
    }
}
