//! Evaluation configuration

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input file read by the binary
pub const DEFAULT_DATA_PATH: &str = "data/train.csv";

/// Default label column name
pub const DEFAULT_LABEL_COLUMN: &str = "label";

/// Default number of cross-validation folds
pub const DEFAULT_FOLDS: usize = 5;

/// How a fold's training rows are separated from its held-out rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Train on every index outside the fold
    #[default]
    ByIndex,
    /// Drop every row equal by value to a held-out row, duplicates included
    ByValue,
}

/// What happens to the `n mod k` rows left after equal-size slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leftover rows are never held out
    #[default]
    Drop,
    /// The first `n mod k` folds take one extra row each
    Distribute,
}

/// Configuration for an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Labeled input file
    pub data_path: PathBuf,

    /// Label column name
    pub label_column: String,

    /// Field delimiter
    pub delimiter: char,

    /// Number of cross-validation folds
    pub cv_folds: usize,

    /// Fold training-set construction
    pub exclusion: ExclusionPolicy,

    /// Leftover row handling
    pub remainder: RemainderPolicy,

    /// Shuffle row indices before slicing folds
    pub shuffle: bool,

    /// Seed for the shuffle (None = entropy)
    pub random_state: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            delimiter: ',',
            cv_folds: DEFAULT_FOLDS,
            exclusion: ExclusionPolicy::default(),
            remainder: RemainderPolicy::default(),
            shuffle: false,
            random_state: None,
        }
    }
}

impl EvaluationConfig {
    /// Create a new configuration
    pub fn new(data_path: impl Into<PathBuf>, label_column: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            label_column: label_column.into(),
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionPolicy) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.cv_folds < 2 {
            return Err(HarnessError::InvalidParameter {
                name: "cv_folds".to_string(),
                value: self.cv_folds.to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if !self.delimiter.is_ascii() {
            return Err(HarnessError::InvalidParameter {
                name: "delimiter".to_string(),
                value: self.delimiter.to_string(),
                reason: "must be a single ASCII character".to_string(),
            });
        }
        if self.label_column.is_empty() {
            return Err(HarnessError::ConfigError(
                "label column name is empty".to_string(),
            ));
        }
        Ok(())
    }
}
