//! Model training and evaluation
//!
//! - [`majority`] - majority-label baseline builder and model
//! - [`cross_validation`] - k-fold splitting and held-out prediction
//! - [`metrics`] - accuracy scoring
//! - [`engine`] - end-to-end evaluation run

mod config;
mod engine;
mod models;
pub mod cross_validation;
pub mod majority;
pub mod metrics;

pub use config::{
    EvaluationConfig, ExclusionPolicy, RemainderPolicy, DEFAULT_DATA_PATH, DEFAULT_FOLDS,
    DEFAULT_LABEL_COLUMN,
};
pub use cross_validation::{
    CVResults, CVSplit, CrossValidator, CvOutcome, FoldSummary, HeldOutPrediction,
};
pub use engine::{EvaluationEngine, EvaluationReport};
pub use majority::{MajorityLabelBuilder, MajorityModel};
pub use metrics::{accuracy, AccuracyEvaluator, Evaluator};
pub use models::{Labeler, ModelBuilder};
