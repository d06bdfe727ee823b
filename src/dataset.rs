//! In-memory records and datasets
//!
//! Records are immutable once built. A dataset keeps its rows in load order
//! together with the ordered list of feature columns it was read with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature name to value mapping of a single row
pub type Features = BTreeMap<String, f64>;

/// A row without a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    features: Features,
}

impl Record {
    pub fn new(features: Features) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Value of one feature, if the row has it
    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }
}

/// A row with its ground-truth label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    features: Features,
    label: String,
}

impl LabeledRecord {
    pub fn new(features: Features, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Copy of this row with the label stripped
    pub fn to_unlabeled(&self) -> Record {
        Record::new(self.features.clone())
    }
}

/// Ordered collection of labeled rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDataset {
    feature_names: Vec<String>,
    label_column: String,
    records: Vec<LabeledRecord>,
}

impl LabeledDataset {
    pub fn new(
        feature_names: Vec<String>,
        label_column: impl Into<String>,
        records: Vec<LabeledRecord>,
    ) -> Self {
        Self {
            feature_names,
            label_column: label_column.into(),
            records,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ground-truth labels in row order
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.records.iter().map(LabeledRecord::label)
    }

    /// The same rows with labels stripped, row-aligned with `self`
    pub fn unlabeled(&self) -> UnlabeledDataset {
        UnlabeledDataset::new(
            self.feature_names.clone(),
            self.records.iter().map(LabeledRecord::to_unlabeled).collect(),
        )
    }

    /// Label occurrence counts, ordered by first appearance
    pub fn label_distribution(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for label in self.labels() {
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }
        counts
    }
}

/// Ordered collection of unlabeled rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlabeledDataset {
    feature_names: Vec<String>,
    records: Vec<Record>,
}

impl UnlabeledDataset {
    pub fn new(feature_names: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            feature_names,
            records,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
