use std::collections::BTreeMap;

use crate::config::CombatConfig;

/// Body part groups and hit weights.
///
/// A target's group is its first tag that names a configured group, else
/// `humanoid` when configured, else the first configured group.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BodyPartConfig {
    /// Group name to its parts, in selection order.
    pub groups: BTreeMap<String, Vec<String>>,
    /// Group name to per-part weights. Parts without a weight count as `1.0`.
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl BodyPartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group with weighted parts (builder pattern).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>, parts: &[(&str, f64)]) -> Self {
        let group = group.into();
        self.groups.insert(
            group.clone(),
            parts.iter().map(|(name, _)| name.to_string()).collect(),
        );
        self.weights.insert(
            group,
            parts
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        );
        self
    }

    /// Group used for a target with the given tags.
    pub fn group_for<'a>(&'a self, tags: &[String]) -> Option<&'a str> {
        for tag in tags {
            if let Some((name, _)) = self.groups.get_key_value(tag.as_str()) {
                return Some(name.as_str());
            }
        }
        if let Some((name, _)) = self.groups.get_key_value(CombatConfig::DEFAULT_BODY_GROUP) {
            return Some(name.as_str());
        }
        self.groups.keys().next().map(String::as_str)
    }

    pub fn parts(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weights aligned with [`Self::parts`], or `None` when the group is unweighted.
    pub fn weights_for(&self, group: &str) -> Option<Vec<f64>> {
        let table = self.weights.get(group).filter(|w| !w.is_empty())?;
        Some(
            self.parts(group)
                .iter()
                .map(|part| table.get(part).copied().unwrap_or(1.0))
                .collect(),
        )
    }
}
