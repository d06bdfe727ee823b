//! Model roles
//!
//! Each role is a single-method contract: a builder fits a labeler from
//! labeled rows, and a labeler answers one query at a time.

use crate::dataset::{Features, LabeledRecord};
use crate::error::Result;

/// Answers label queries for single rows
pub trait Labeler {
    /// Predicted label for one feature mapping
    fn label(&self, features: &Features) -> &str;
}

/// Fits a fresh model from labeled rows
pub trait ModelBuilder {
    type Model: Labeler;

    fn fit<'a, I>(&self, records: I) -> Result<Self::Model>
    where
        I: IntoIterator<Item = &'a LabeledRecord>;
}
