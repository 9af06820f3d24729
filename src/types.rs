//! Core data types for the prize wheel.
//!
//! Options are kept in list order everywhere: the index of an option is also
//! the index of its slice on the wheel face, so every module agrees on
//! `options[i]` ↔ slice `i`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::WheelError;

/// One segment of the wheel with its relative probability mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOption {
    pub id: String,
    pub label: String,
    pub color: String,
    /// Relative weight. Does not need to sum to 100 across the list.
    pub weight: f64,
}

impl WeightedOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            weight,
        }
    }
}

/// Outcome of a completed spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub option: WeightedOption,
    /// Slice index the pointer landed on.
    pub index: usize,
    /// Wall-clock milliseconds since the Unix epoch. Display only.
    pub timestamp_ms: f64,
}

/// A validated option list: at least two entries, strictly positive finite
/// weights, unique ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WheelOptions {
    items: Vec<WeightedOption>,
}

impl WheelOptions {
    pub fn new(items: Vec<WeightedOption>) -> Result<Self, WheelError> {
        if items.len() < 2 {
            return Err(WheelError::TooFewOptions(items.len()));
        }

        let mut seen = HashSet::with_capacity(items.len());
        for opt in &items {
            if !opt.weight.is_finite() || opt.weight <= 0.0 {
                return Err(WheelError::InvalidWeight {
                    id: opt.id.clone(),
                    weight: opt.weight,
                });
            }
            if !seen.insert(opt.id.as_str()) {
                return Err(WheelError::DuplicateId(opt.id.clone()));
            }
        }

        Ok(Self { items })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a constructed list holds at least two options.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&WeightedOption> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[WeightedOption] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedOption> {
        self.items.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|o| o.weight).sum()
    }

    /// Selection probability of the option at `index` (weight / total weight).
    pub fn probability(&self, index: usize) -> Option<f64> {
        let total = self.total_weight();
        self.items.get(index).map(|o| o.weight / total)
    }

    pub fn into_inner(self) -> Vec<WeightedOption> {
        self.items
    }
}

impl<'de> Deserialize<'de> for WheelOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<WeightedOption>::deserialize(deserializer)?;
        WheelOptions::new(items).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a WheelOptions {
    type Item = &'a WeightedOption;
    type IntoIter = std::slice::Iter<'a, WeightedOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: &str, weight: f64) -> WeightedOption {
        WeightedOption::new(id, format!("Label {id}"), "#ffffff", weight)
    }

    #[test]
    fn test_rejects_single_option() {
        let err = WheelOptions::new(vec![opt("a", 1.0)]).unwrap_err();
        assert!(matches!(err, WheelError::TooFewOptions(1)));
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let err = WheelOptions::new(vec![opt("a", 1.0), opt("b", 0.0)]).unwrap_err();
        assert!(matches!(err, WheelError::InvalidWeight { .. }));

        let err = WheelOptions::new(vec![opt("a", f64::NAN), opt("b", 1.0)]).unwrap_err();
        assert!(matches!(err, WheelError::InvalidWeight { .. }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = WheelOptions::new(vec![opt("a", 1.0), opt("a", 2.0)]).unwrap_err();
        assert!(matches!(err, WheelError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_probability_normalizes_by_total() {
        let options = WheelOptions::new(vec![opt("a", 1.0), opt("b", 3.0)]).unwrap();
        assert_eq!(options.total_weight(), 4.0);
        assert_eq!(options.probability(0), Some(0.25));
        assert_eq!(options.probability(1), Some(0.75));
        assert_eq!(options.probability(2), None);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: WheelOptions = serde_json::from_str(
            r##"[{"id":"1","label":"A","color":"#fff","weight":2},{"id":"2","label":"B","color":"#000","weight":1}]"##,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<WheelOptions>(r##"[{"id":"1","label":"A","color":"#fff","weight":2}]"##);
        assert!(bad.is_err());
    }
}
