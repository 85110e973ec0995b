use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single feature toggle value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Variant(String),
}

/// Opaque mapping from flag name to value, as delivered by the gating service.
///
/// An empty set is the fail-open value: every flag reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, FlagValue>);

impl FeatureFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.0.get(name)
    }

    /// `true` only for flags explicitly set to `Bool(true)`.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FlagValue::Bool(true)))
    }

    /// Returns the variant name for enumerated flags.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FlagValue::Variant(v)) => Some(v),
            _ => None,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FlagValue) -> Option<FlagValue> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, FlagValue)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (K, FlagValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
