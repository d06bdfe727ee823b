//! Baseline Harness - majority-label classifier evaluation
//!
//! Loads delimited tabular data, fits a model that always answers with the
//! most frequent training label, and scores it two ways: accuracy on the
//! training rows and k-fold cross-validation accuracy.
//!
//! # Modules
//!
//! - [`dataset`] - records and datasets
//! - [`utils`] - delimited text loading and CSV export
//! - [`training`] - model builder, cross-validation, scoring, evaluation engine
//! - [`inference`] - lazy prediction over rows
//! - [`cli`] - command-line interface

pub mod error;

pub mod dataset;
pub mod inference;
pub mod training;
pub mod utils;

pub mod cli;

pub use error::{HarnessError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{HarnessError, Result};

    pub use crate::dataset::{Features, LabeledDataset, LabeledRecord, Record, UnlabeledDataset};

    pub use crate::utils::{DataLoader, DataSaver};

    pub use crate::inference::{predict, Predictions};

    pub use crate::training::{
        accuracy, AccuracyEvaluator, CrossValidator, CvOutcome, EvaluationConfig, EvaluationEngine,
        EvaluationReport, Evaluator, ExclusionPolicy, Labeler, MajorityLabelBuilder, MajorityModel,
        ModelBuilder, RemainderPolicy,
    };
}
