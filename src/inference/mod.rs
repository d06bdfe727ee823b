//! Prediction generation
//!
//! Applies a [`Labeler`] lazily over already-loaded rows. The iterator borrows
//! both the labeler and the rows, yields one label per row in row order, and
//! can be rebuilt at any time since it holds no state beyond its position.

use crate::dataset::{Features, LabeledRecord, Record};
use crate::training::Labeler;
use std::iter::FusedIterator;

/// Anything a labeler can be queried with
pub trait HasFeatures {
    fn features(&self) -> &Features;
}

impl HasFeatures for Record {
    fn features(&self) -> &Features {
        Record::features(self)
    }
}

impl HasFeatures for LabeledRecord {
    fn features(&self) -> &Features {
        LabeledRecord::features(self)
    }
}

impl HasFeatures for Features {
    fn features(&self) -> &Features {
        self
    }
}

impl<T: HasFeatures + ?Sized> HasFeatures for &T {
    fn features(&self) -> &Features {
        (**self).features()
    }
}

/// Lazy sequence of predicted labels
pub struct Predictions<'a, 'r, L: ?Sized, R> {
    labeler: &'a L,
    rows: std::slice::Iter<'r, R>,
}

impl<'a, L, R> Iterator for Predictions<'a, '_, L, R>
where
    L: Labeler + ?Sized,
    R: HasFeatures,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let labeler: &'a L = self.labeler;
        let row = self.rows.next()?;
        Some(labeler.label(row.features()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<L, R> ExactSizeIterator for Predictions<'_, '_, L, R>
where
    L: Labeler + ?Sized,
    R: HasFeatures,
{
}

impl<L, R> FusedIterator for Predictions<'_, '_, L, R>
where
    L: Labeler + ?Sized,
    R: HasFeatures,
{
}

/// Predict every row, in order
pub fn predict<'a, 'r, L, R>(labeler: &'a L, rows: &'r [R]) -> Predictions<'a, 'r, L, R>
where
    L: Labeler + ?Sized,
    R: HasFeatures,
{
    Predictions {
        labeler,
        rows: rows.iter(),
    }
}
