//! Dataset shape served by the remote JSON documents.
//!
//! A document looks like:
//! ```json
//! { "title": "OS Doors",
//!   "dev":  { "front": 66, "back": 100, "db": 31 },
//!   "test": { "front": 60, "back": 80,  "db": 85 },
//!   "prod": { "front": 66, "back": 83,  "db": 31 },
//!   "norm": 150 }
//! ```

use serde::{Deserialize, Serialize};

/// Sub-components every environment is broken down into, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Front,
    Back,
    Db,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Front, Component::Back, Component::Db];

    /// JSON key and CSS modifier.
    pub fn key(self) -> &'static str {
        match self {
            Component::Front => "front",
            Component::Back => "back",
            Component::Db => "db",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Component::Front => "#4AB6E8",
            Component::Back => "#AA6FAC",
            Component::Db => "#E85498",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentBreakdown {
    pub front: f64,
    pub back: f64,
    pub db: f64,
}

impl EnvironmentBreakdown {
    pub fn new(front: f64, back: f64, db: f64) -> Self {
        Self { front, back, db }
    }

    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Front => self.front,
            Component::Back => self.back,
            Component::Db => self.db,
        }
    }

    /// Values paired with their component, in fixed key order.
    pub fn parts(&self) -> [(Component, f64); 3] {
        Component::ALL.map(|component| (component, self.get(component)))
    }

    pub fn total(&self) -> f64 {
        self.front + self.back + self.db
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            front: f(self.front),
            back: f(self.back),
            db: f(self.db),
        }
    }
}

/// The four bar groups, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Dev,
    Test,
    Prod,
    Norm,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Dev,
        GroupKind::Test,
        GroupKind::Prod,
        GroupKind::Norm,
    ];

    /// Environment groups only; these are the ones joined by connectors.
    pub const ENVIRONMENTS: [GroupKind; 3] = [GroupKind::Dev, GroupKind::Test, GroupKind::Prod];

    pub fn is_environment(self) -> bool {
        !matches!(self, GroupKind::Norm)
    }
}

/// A bar group is either a scalar (the norm) or a stacked breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupValue {
    Scalar(f64),
    Breakdown(EnvironmentBreakdown),
}

impl GroupValue {
    pub fn total(&self) -> f64 {
        match self {
            GroupValue::Scalar(value) => *value,
            GroupValue::Breakdown(breakdown) => breakdown.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub title: String,
    pub dev: EnvironmentBreakdown,
    pub test: EnvironmentBreakdown,
    pub prod: EnvironmentBreakdown,
    pub norm: f64,
}

impl Dataset {
    pub fn group(&self, kind: GroupKind) -> GroupValue {
        match kind {
            GroupKind::Dev => GroupValue::Breakdown(self.dev),
            GroupKind::Test => GroupValue::Breakdown(self.test),
            GroupKind::Prod => GroupValue::Breakdown(self.prod),
            GroupKind::Norm => GroupValue::Scalar(self.norm),
        }
    }

    pub fn groups(&self) -> [(GroupKind, GroupValue); 4] {
        GroupKind::ALL.map(|kind| (kind, self.group(kind)))
    }

    /// `[dev, test, prod, norm]` totals.
    pub fn totals(&self) -> [f64; 4] {
        GroupKind::ALL.map(|kind| self.group(kind).total())
    }

    pub fn environments(&self) -> [EnvironmentBreakdown; 3] {
        [self.dev, self.test, self.prod]
    }

    pub fn is_all_zero(&self) -> bool {
        self.totals().iter().all(|total| *total == 0.0)
    }

    /// First leaf that is negative or non-finite, as `(path, value)`.
    pub fn first_invalid_leaf(&self) -> Option<(String, f64)> {
        let environments = [("dev", &self.dev), ("test", &self.test), ("prod", &self.prod)];
        environments
            .iter()
            .flat_map(|(env, breakdown)| {
                breakdown
                    .parts()
                    .map(|(component, value)| (format!("{env}.{}", component.key()), value))
            })
            .chain(std::iter::once(("norm".to_string(), self.norm)))
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }

    fn map_leaves(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            title: self.title.clone(),
            dev: self.dev.map(&f),
            test: self.test.map(&f),
            prod: self.prod.map(&f),
            norm: f(self.norm),
        }
    }
}

/// `log10(1 + v)`: zero stays zero and the order of values is preserved.
pub fn log_transform(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        value.ln_1p() / std::f64::consts::LN_10
    }
}

/// Log view of a dataset: every leaf and every raw group total passed
/// through [`log_transform`].
///
/// Group heights on the log scale come from `totals`, not from summing the
/// transformed leaves; a sum of logs does not keep the order of the real
/// totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedDataset {
    leaves: Dataset,
    totals: [f64; 4],
}

impl TransformedDataset {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            leaves: dataset.map_leaves(log_transform),
            totals: dataset.totals().map(log_transform),
        }
    }

    pub fn as_dataset(&self) -> &Dataset {
        &self.leaves
    }

    /// `log_transform` of each raw group total, in group order.
    pub fn totals(&self) -> [f64; 4] {
        self.totals
    }
}

/// A fetched dataset together with its precomputed log view.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub raw: Dataset,
    pub transformed: TransformedDataset,
}

impl LoadedDataset {
    pub fn new(raw: Dataset) -> Self {
        let transformed = TransformedDataset::from_dataset(&raw);
        Self { raw, transformed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        serde_json::from_value(json!({
            "title": "OS Doors",
            "dev": { "front": 66, "back": 100, "db": 31 },
            "test": { "front": 60, "back": 80, "db": 85 },
            "prod": { "front": 66, "back": 83, "db": 31 },
            "norm": 150
        }))
        .unwrap()
    }

    #[test]
    fn totals_follow_group_order() {
        assert_eq!(sample().totals(), [197.0, 225.0, 180.0, 150.0]);
    }

    #[test]
    fn parts_keep_fixed_key_order() {
        let keys: Vec<_> = sample().dev.parts().iter().map(|(c, _)| c.key()).collect();
        assert_eq!(keys, ["front", "back", "db"]);
    }

    #[test]
    fn missing_title_defaults_to_empty() {
        let dataset: Dataset = serde_json::from_value(json!({
            "dev": { "front": 0, "back": 0, "db": 0 },
            "test": { "front": 0, "back": 0, "db": 0 },
            "prod": { "front": 0, "back": 0, "db": 0 },
            "norm": 0
        }))
        .unwrap();
        assert!(dataset.title.is_empty());
        assert!(dataset.is_all_zero());
    }

    #[test]
    fn log_transform_keeps_zero_and_order() {
        assert_eq!(log_transform(0.0), 0.0);
        assert!((log_transform(9.0) - 1.0).abs() < 1e-12);
        assert!(log_transform(2.0) < log_transform(3.0));
    }

    #[test]
    fn transformed_dataset_keeps_title_and_shape() {
        let loaded = LoadedDataset::new(sample());
        let transformed = loaded.transformed.as_dataset();
        assert_eq!(transformed.title, "OS Doors");
        assert!((transformed.norm - 151f64.log10()).abs() < 1e-12);
        assert_eq!(loaded.raw, sample());
    }

    #[test]
    fn transformed_totals_keep_raw_order() {
        let dataset: Dataset = serde_json::from_value(json!({
            "dev": { "front": 10, "back": 10, "db": 10 },
            "test": { "front": 1000, "back": 0, "db": 0 },
            "prod": { "front": 20, "back": 0, "db": 0 },
            "norm": 5
        }))
        .unwrap();
        let totals = LoadedDataset::new(dataset).transformed.totals();
        assert!((totals[0] - 31f64.log10()).abs() < 1e-12);
        assert!(totals[1] > totals[0] && totals[0] > totals[2] && totals[2] > totals[3]);
    }

    #[test]
    fn invalid_leaf_is_reported_with_path() {
        let mut dataset = sample();
        dataset.test.db = -1.0;
        assert_eq!(dataset.first_invalid_leaf(), Some(("test.db".to_string(), -1.0)));
        dataset.test.db = 1.0;
        dataset.norm = f64::NAN;
        assert_eq!(
            dataset.first_invalid_leaf().map(|(path, _)| path),
            Some("norm".to_string())
        );
    }
}
