//! Prediction scoring

use crate::error::{HarnessError, Result};

/// Scores predicted labels against ground truth
pub trait Evaluator {
    /// Score two sequences of equal length; mismatched lengths are an error
    fn evaluate<T, P>(&self, truth: T, predictions: P) -> Result<f64>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>;
}

/// Fraction of exact, case-sensitive label matches
#[derive(Debug, Clone, Copy, Default)]
pub struct AccuracyEvaluator;

impl AccuracyEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for AccuracyEvaluator {
    fn evaluate<T, P>(&self, truth: T, predictions: P) -> Result<f64>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let truth: Vec<T::Item> = truth.into_iter().collect();
        let predictions: Vec<P::Item> = predictions.into_iter().collect();

        if truth.len() != predictions.len() {
            return Err(HarnessError::LengthMismatch {
                expected: truth.len(),
                actual: predictions.len(),
            });
        }
        if truth.is_empty() {
            return Err(HarnessError::EmptyInput(
                "no predictions to score".to_string(),
            ));
        }

        let correct = truth
            .iter()
            .zip(&predictions)
            .filter(|(t, p)| t.as_ref() == p.as_ref())
            .count();

        Ok(correct as f64 / truth.len() as f64)
    }
}

/// Accuracy of `predictions` against `truth`
pub fn accuracy<T, P>(truth: T, predictions: P) -> Result<f64>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    AccuracyEvaluator.evaluate(truth, predictions)
}
