//! Disease label to precaution list lookup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Returned for labels the mapping has no entry for
pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecautionMapping(HashMap<String, Vec<String>>);

impl PrecautionMapping {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self(entries)
    }

    /// Precautions for `label`, or a single placeholder when none are known
    pub fn lookup(&self, label: &str) -> Vec<String> {
        self.0
            .get(label)
            .cloned()
            .unwrap_or_else(|| vec![NO_DATA.to_string()])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for PrecautionMapping {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_label_keeps_order() {
        let mapping: PrecautionMapping =
            [("Flu".to_string(), vec!["rest".to_string(), "hydrate".to_string()])]
                .into_iter()
                .collect();
        assert_eq!(mapping.lookup("Flu"), vec!["rest", "hydrate"]);
    }

    #[test]
    fn missing_label_yields_placeholder() {
        let mapping = PrecautionMapping::default();
        assert_eq!(mapping.lookup("Migraine"), vec![NO_DATA]);
    }

    #[test]
    fn parses_plain_json_object() {
        let mapping: PrecautionMapping =
            serde_json::from_str(r#"{"Cold": ["keep warm"]}"#).unwrap();
        assert!(mapping.contains("Cold"));
        assert_eq!(mapping.len(), 1);
    }
}
