//! Error types for the baseline harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Parse error: cannot read '{token}' in column '{column}' (line {line}) as a number")]
    Parse {
        token: String,
        column: String,
        line: usize,
    },

    #[error("Malformed row at line {line}: expected {expected} fields, got {actual}")]
    MalformedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Length mismatch: expected {expected} predictions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Empty training set")]
    EmptyTrainingSet,

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for HarnessError {
    fn from(err: polars::error::PolarsError) -> Self {
        HarnessError::DataError(err.to_string())
    }
}

impl From<csv::Error> for HarnessError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => HarnessError::IoError(e),
            csv::ErrorKind::UnequalLengths { pos, expected_len, len } => {
                HarnessError::MalformedRow {
                    line: pos.map_or(0, |p| p.line() as usize),
                    expected: expected_len as usize,
                    actual: len as usize,
                }
            }
            _ => HarnessError::DataError(message),
        }
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarnessError::ColumnNotFound("label".to_string());
        assert_eq!(err.to_string(), "Column not found: label");

        let err = HarnessError::LengthMismatch { expected: 10, actual: 9 };
        assert_eq!(err.to_string(), "Length mismatch: expected 10 predictions, got 9");
    }

    #[test]
    fn test_parse_error_names_token() {
        let err = HarnessError::Parse {
            token: "abc".to_string(),
            column: "a".to_string(),
            line: 3,
        };
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HarnessError = io_err.into();
        assert!(matches!(err, HarnessError::IoError(_)));
    }
}
