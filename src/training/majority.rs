//! Majority-label baseline
//!
//! The fitted model ignores every feature and answers with the most frequent
//! training label. When several labels share the top count, the one seen
//! first in training order wins.

use super::models::{Labeler, ModelBuilder};
use crate::dataset::{Features, LabeledRecord};
use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Builder for [`MajorityModel`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityLabelBuilder;

impl MajorityLabelBuilder {
    pub fn new() -> Self {
        Self
    }
}

/// Constant-prediction model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorityModel {
    label: String,
    /// Training label counts, ordered by first appearance
    label_counts: Vec<(String, usize)>,
    n_samples: usize,
}

impl MajorityModel {
    /// The label every query receives
    pub fn predicted_label(&self) -> &str {
        &self.label
    }

    pub fn label_counts(&self) -> &[(String, usize)] {
        &self.label_counts
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

impl ModelBuilder for MajorityLabelBuilder {
    type Model = MajorityModel;

    fn fit<'a, I>(&self, records: I) -> Result<MajorityModel>
    where
        I: IntoIterator<Item = &'a LabeledRecord>,
    {
        // label -> position in `counts`
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut n_samples = 0;

        for record in records {
            let label = record.label();
            match slots.get(label) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
            n_samples += 1;
        }

        // Strictly greater keeps the earliest label on ties
        let mut best: Option<(&str, usize)> = None;
        for &(label, count) in &counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((label, count));
            }
        }
        let (label, _) = best.ok_or(HarnessError::EmptyTrainingSet)?;

        Ok(MajorityModel {
            label: label.to_string(),
            label_counts: counts.iter().map(|(l, c)| (l.to_string(), *c)).collect(),
            n_samples,
        })
    }
}

impl Labeler for MajorityModel {
    fn label(&self, _features: &Features) -> &str {
        &self.label
    }
}
