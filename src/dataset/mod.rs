//! Labeled 2-D points consumed by the classifier.
//!
//! Points are normalized into `[-1, 1]` by the loader, so the classifier and the
//! boundary geometry never need to know about the original feature units.

mod iris;

pub use iris::{IRIS_CLASS_NAMES, load_iris_csv, parse_iris_csv};

use std::path::PathBuf;

use thiserror::Error;

/// A single normalized feature pair with its class label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    pub x: f32,
    pub y: f32,
    pub label: usize,
}

impl LabeledPoint {
    pub fn new(x: f32, y: f32, label: usize) -> Self {
        Self { x, y, label }
    }
}

/// Immutable point collection loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<LabeledPoint>,
    skipped_rows: usize,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Wrap already-normalized points.
    pub fn from_points(points: Vec<LabeledPoint>) -> Self {
        Self {
            points,
            skipped_rows: 0,
            source: None,
        }
    }

    pub fn points(&self) -> &[LabeledPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of malformed rows dropped while parsing.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// File the points were read from, if any.
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Count points per label for `n_classes` classes; out-of-range labels are ignored.
    pub fn class_counts(&self, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0usize; n_classes];
        for point in &self.points {
            if let Some(count) = counts.get_mut(point.label) {
                *count += 1;
            }
        }
        counts
    }
}

/// Errors raised while loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened or read.
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file has no header row.
    #[error("Dataset {path} is empty")]
    Empty { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_counts_ignore_unknown_labels() {
        let dataset = Dataset::from_points(vec![
            LabeledPoint::new(0.0, 0.0, 0),
            LabeledPoint::new(0.1, 0.2, 2),
            LabeledPoint::new(0.3, 0.4, 2),
            LabeledPoint::new(0.5, 0.6, 7),
        ]);
        assert_eq!(dataset.class_counts(3), vec![1, 0, 2]);
        assert_eq!(dataset.len(), 4);
        assert!(dataset.source().is_none());
    }
}
