//! Cross-validation
//!
//! Folds are contiguous slices of the (optionally shuffled) row indices.
//! Each fold trains a fresh model on its complement and predicts its own
//! rows; predictions are concatenated in fold order.

use super::config::{EvaluationConfig, ExclusionPolicy, RemainderPolicy, DEFAULT_FOLDS};
use super::metrics::accuracy;
use super::models::ModelBuilder;
use crate::dataset::{LabeledDataset, LabeledRecord};
use crate::error::{HarnessError, Result};
use crate::inference::predict;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A single train/test split
#[derive(Debug, Clone)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// K-fold cross-validator
#[derive(Debug, Clone)]
pub struct CrossValidator {
    n_splits: usize,
    exclusion: ExclusionPolicy,
    remainder: RemainderPolicy,
    shuffle: bool,
    random_state: Option<u64>,
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS)
    }
}

impl CrossValidator {
    /// Create a new cross-validator with `n_splits` contiguous folds
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            exclusion: ExclusionPolicy::default(),
            remainder: RemainderPolicy::default(),
            shuffle: false,
            random_state: None,
        }
    }

    /// Build from an evaluation configuration
    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self {
            n_splits: config.cv_folds,
            exclusion: config.exclusion,
            remainder: config.remainder,
            shuffle: config.shuffle,
            random_state: config.random_state,
        }
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionPolicy) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Shuffle indices before slicing
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducibility
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Generate index-based train/test splits for `n_samples` rows
    pub fn split(&self, n_samples: usize) -> Result<Vec<CVSplit>> {
        let n_splits = self.n_splits;
        if n_splits < 2 {
            return Err(HarnessError::InvalidParameter {
                name: "n_splits".to_string(),
                value: n_splits.to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if n_samples < n_splits {
            return Err(HarnessError::InvalidParameter {
                name: "n_splits".to_string(),
                value: n_splits.to_string(),
                reason: format!("cannot exceed the number of rows ({})", n_samples),
            });
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();

        if self.shuffle {
            let mut rng = match self.random_state {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_entropy(),
            };
            indices.shuffle(&mut rng);
        }

        let base = n_samples / n_splits;
        let remainder = n_samples % n_splits;
        let fold_sizes: Vec<usize> = (0..n_splits)
            .map(|i| match self.remainder {
                RemainderPolicy::Distribute if i < remainder => base + 1,
                _ => base,
            })
            .collect();

        let mut splits = Vec::with_capacity(n_splits);
        let mut current = 0;

        for (fold_idx, &fold_size) in fold_sizes.iter().enumerate() {
            let test_indices: Vec<usize> = indices[current..current + fold_size].to_vec();
            let train_indices: Vec<usize> = indices[..current]
                .iter()
                .chain(indices[current + fold_size..].iter())
                .copied()
                .collect();

            splits.push(CVSplit {
                train_indices,
                test_indices,
                fold_idx,
            });

            current += fold_size;
        }

        if current < n_samples {
            debug!(
                left_out = n_samples - current,
                "Remainder rows are not held out in any fold"
            );
        }

        Ok(splits)
    }

    /// Train and predict fold by fold
    pub fn cross_validate<B: ModelBuilder>(
        &self,
        builder: &B,
        data: &LabeledDataset,
    ) -> Result<CvOutcome> {
        let records = data.records();
        let splits = self.split(records.len())?;

        let mut predictions = Vec::new();
        let mut folds = Vec::with_capacity(splits.len());

        for split in &splits {
            let train = self.training_indices(split, records);
            if train.len() < split.train_indices.len() {
                warn!(
                    fold = split.fold_idx,
                    dropped = split.train_indices.len() - train.len(),
                    "Value-based exclusion removed duplicate rows from training"
                );
            }

            let model = builder.fit(train.iter().map(|&i| &records[i]))?;
            let test: Vec<&LabeledRecord> =
                split.test_indices.iter().map(|&i| &records[i]).collect();
            let fold_predictions: Vec<&str> = predict(&model, &test).collect();

            let fold_accuracy = accuracy(test.iter().map(|r| r.label()), &fold_predictions)?;
            debug!(
                fold = split.fold_idx,
                n_train = train.len(),
                n_test = test.len(),
                accuracy = fold_accuracy,
                "Fold complete"
            );

            folds.push(FoldSummary {
                fold_idx: split.fold_idx,
                n_train: train.len(),
                n_test: test.len(),
                accuracy: fold_accuracy,
            });
            predictions.extend(split.test_indices.iter().zip(fold_predictions).map(
                |(&index, label)| HeldOutPrediction {
                    index,
                    fold_idx: split.fold_idx,
                    label: label.to_string(),
                },
            ));
        }

        info!(
            folds = folds.len(),
            held_out = predictions.len(),
            rows = records.len(),
            "Cross-validation finished"
        );

        Ok(CvOutcome { predictions, folds })
    }

    fn training_indices(&self, split: &CVSplit, records: &[LabeledRecord]) -> Vec<usize> {
        match self.exclusion {
            ExclusionPolicy::ByIndex => split.train_indices.clone(),
            ExclusionPolicy::ByValue => {
                let held_out: Vec<&LabeledRecord> =
                    split.test_indices.iter().map(|&i| &records[i]).collect();
                (0..records.len())
                    .filter(|&i| !held_out.contains(&&records[i]))
                    .collect()
            }
        }
    }
}

/// One held-out prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldOutPrediction {
    /// Row index in the source dataset
    pub index: usize,
    pub fold_idx: usize,
    pub label: String,
}

/// Per-fold bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldSummary {
    pub fold_idx: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub accuracy: f64,
}

/// Everything a cross-validation run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvOutcome {
    /// Held-out predictions, fold 0 first
    pub predictions: Vec<HeldOutPrediction>,
    pub folds: Vec<FoldSummary>,
}

impl CvOutcome {
    /// Predicted labels in fold order
    pub fn predicted_labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.predictions.iter().map(|p| p.label.as_str())
    }

    /// Ground-truth labels of the held-out rows, aligned with the predictions.
    ///
    /// `data` must be the dataset that was cross-validated; a prediction whose
    /// row index falls outside it is an error.
    pub fn held_out_labels<'a>(&'a self, data: &'a LabeledDataset) -> Result<Vec<&'a str>> {
        self.predictions
            .iter()
            .map(|p| {
                data.records()
                    .get(p.index)
                    .map(LabeledRecord::label)
                    .ok_or_else(|| HarnessError::InvalidParameter {
                        name: "data".to_string(),
                        value: format!("{} rows", data.len()),
                        reason: format!("held-out row {} is out of range", p.index),
                    })
            })
            .collect()
    }

    /// Accuracy over every row that received a held-out prediction
    pub fn accuracy(&self, data: &LabeledDataset) -> Result<f64> {
        accuracy(self.held_out_labels(data)?, self.predicted_labels())
    }

    /// Summary statistics of the per-fold accuracies
    pub fn fold_scores(&self) -> CVResults {
        CVResults::from_scores(self.folds.iter().map(|f| f.accuracy).collect())
    }
}

/// Cross-validation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CVResults {
    /// Scores for each fold
    pub scores: Vec<f64>,
    /// Mean score across folds
    pub mean_score: f64,
    /// Standard deviation of scores
    pub std_score: f64,
    /// Number of folds
    pub n_folds: usize,
}

impl CVResults {
    /// Create CV results from fold scores
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let n_folds = scores.len();
        if n_folds == 0 {
            return Self {
                scores,
                mean_score: 0.0,
                std_score: 0.0,
                n_folds,
            };
        }
        let mean_score = scores.iter().sum::<f64>() / n_folds as f64;
        let variance =
            scores.iter().map(|s| (s - mean_score).powi(2)).sum::<f64>() / n_folds as f64;
        let std_score = variance.sqrt();

        Self {
            scores,
            mean_score,
            std_score,
            n_folds,
        }
    }
}
