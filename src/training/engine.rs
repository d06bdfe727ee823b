//! Evaluation engine
//!
//! Wires loading, fitting, prediction, scoring and cross-validation into a
//! single run that yields an [`EvaluationReport`].

use super::config::EvaluationConfig;
use super::cross_validation::{CVResults, CrossValidator, FoldSummary};
use super::majority::MajorityLabelBuilder;
use super::metrics::{AccuracyEvaluator, Evaluator};
use super::models::ModelBuilder;
use crate::dataset::{LabeledDataset, UnlabeledDataset};
use crate::error::Result;
use crate::inference::predict;
use crate::utils::DataLoader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Outcome of one evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Accuracy of the full-data model on its own training rows
    pub training_accuracy: f64,
    /// Accuracy over all held-out predictions
    pub cross_validation_accuracy: f64,
    pub n_samples: usize,
    pub n_features: usize,
    /// Rows that received a held-out prediction
    pub n_held_out: usize,
    pub label_distribution: Vec<(String, usize)>,
    pub folds: Vec<FoldSummary>,
    pub fold_scores: CVResults,
    pub elapsed_secs: f64,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training Accuracy: {:.2}", self.training_accuracy)?;
        write!(f, "Cross-Validation Accuracy: {:.2}", self.cross_validation_accuracy)
    }
}

/// Main evaluation engine
#[derive(Debug, Clone)]
pub struct EvaluationEngine<B = MajorityLabelBuilder, E = AccuracyEvaluator> {
    config: EvaluationConfig,
    builder: B,
    evaluator: E,
}

impl EvaluationEngine {
    /// Engine with the majority-label builder and accuracy scoring
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_components(config, MajorityLabelBuilder, AccuracyEvaluator)
    }
}

impl<B: ModelBuilder, E: Evaluator> EvaluationEngine<B, E> {
    /// Engine with custom roles
    pub fn with_components(config: EvaluationConfig, builder: B, evaluator: E) -> Self {
        Self {
            config,
            builder,
            evaluator,
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    fn loader(&self) -> DataLoader {
        DataLoader::new().with_delimiter(self.config.delimiter)
    }

    /// Load the labeled file named in the configuration
    pub fn load(&self) -> Result<LabeledDataset> {
        self.config.validate()?;
        self.loader()
            .load_labeled(&self.config.data_path, &self.config.label_column)
    }

    /// Load the configured data and evaluate it
    pub fn run(&self) -> Result<EvaluationReport> {
        let data = self.load()?;
        self.evaluate(&data)
    }

    /// Training and cross-validation accuracy for an already-loaded dataset
    pub fn evaluate(&self, data: &LabeledDataset) -> Result<EvaluationReport> {
        self.config.validate()?;
        let start = Instant::now();

        // The unlabeled view is derived here, so row alignment holds by construction
        let unlabeled = data.unlabeled();
        let model = self.builder.fit(data.records())?;
        let training_accuracy = self
            .evaluator
            .evaluate(data.labels(), predict(&model, unlabeled.records()))?;
        info!(training_accuracy, rows = data.len(), "Scored full-data model");

        let cv = CrossValidator::from_config(&self.config).cross_validate(&self.builder, data)?;
        let cross_validation_accuracy = self
            .evaluator
            .evaluate(cv.held_out_labels(data)?, cv.predicted_labels())?;
        info!(
            cross_validation_accuracy,
            held_out = cv.predictions.len(),
            "Scored held-out predictions"
        );

        Ok(EvaluationReport {
            training_accuracy,
            cross_validation_accuracy,
            n_samples: data.len(),
            n_features: data.feature_names().len(),
            n_held_out: cv.predictions.len(),
            label_distribution: data.label_distribution(),
            fold_scores: cv.fold_scores(),
            folds: cv.folds,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    /// Fit on `train` and label every row of `rows`, keyed by row index
    pub fn fit_predict(
        &self,
        train: &LabeledDataset,
        rows: &UnlabeledDataset,
    ) -> Result<Vec<(usize, String)>> {
        let model = self.builder.fit(train.records())?;
        Ok(predict(&model, rows.records())
            .map(str::to_string)
            .enumerate()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Features, LabeledRecord};
    use crate::error::HarnessError;
    use crate::training::ExclusionPolicy;

    fn record(a: f64, b: f64, label: &str) -> LabeledRecord {
        let mut features = Features::new();
        features.insert("a".to_string(), a);
        features.insert("b".to_string(), b);
        LabeledRecord::new(features, label)
    }

    fn data(records: Vec<LabeledRecord>) -> LabeledDataset {
        LabeledDataset::new(vec!["a".to_string(), "b".to_string()], "label", records)
    }

    #[test]
    fn test_three_row_training_accuracy() {
        let ds = data(vec![
            record(1.0, 2.0, "X"),
            record(3.0, 4.0, "X"),
            record(5.0, 6.0, "Y"),
        ]);
        let engine = EvaluationEngine::new(EvaluationConfig::default().with_cv_folds(3));
        let report = engine.evaluate(&ds).unwrap();

        assert!((report.training_accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert!(report.to_string().starts_with("Training Accuracy: 0.67\n"));
    }

    #[test]
    fn test_report_counts() {
        let records = (0..27)
            .map(|i| record(i as f64, 0.0, if i % 4 == 0 { "Y" } else { "X" }))
            .collect();
        let report = EvaluationEngine::new(EvaluationConfig::default())
            .evaluate(&data(records))
            .unwrap();

        assert_eq!(report.n_samples, 27);
        assert_eq!(report.n_features, 2);
        assert_eq!(report.n_held_out, 25);
        assert_eq!(report.folds.len(), 5);
        assert_eq!(report.fold_scores.n_folds, 5);
        assert!((0.0..=1.0).contains(&report.cross_validation_accuracy));
    }

    #[test]
    fn test_fewer_rows_than_folds() {
        let ds = data(vec![record(1.0, 2.0, "X"), record(3.0, 4.0, "Y")]);
        let err = EvaluationEngine::new(EvaluationConfig::default())
            .evaluate(&ds)
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidParameter { .. }));
    }

    #[test]
    fn test_value_exclusion_through_config() {
        let records = (0..10).map(|_| record(1.0, 1.0, "X")).collect();
        let config = EvaluationConfig::default().with_exclusion(ExclusionPolicy::ByValue);
        let err = EvaluationEngine::new(config)
            .evaluate(&data(records))
            .unwrap_err();
        assert!(matches!(err, HarnessError::EmptyTrainingSet));
    }

    #[test]
    fn test_fit_predict() {
        let ds = data(vec![
            record(1.0, 2.0, "X"),
            record(3.0, 4.0, "X"),
            record(5.0, 6.0, "Y"),
        ]);
        let engine = EvaluationEngine::new(EvaluationConfig::default());
        let predictions = engine.fit_predict(&ds, &ds.unlabeled()).unwrap();

        assert_eq!(
            predictions,
            vec![(0, "X".to_string()), (1, "X".to_string()), (2, "X".to_string())]
        );
    }
}
