//! Iris CSV loader projecting each flower onto its petal measurements.

use std::path::Path;

use super::{Dataset, DatasetError, LabeledPoint};

/// Class names in label order.
pub const IRIS_CLASS_NAMES: [&str; 3] = ["Setosa", "Versicolor", "Virginica"];

const PETAL_LENGTH_RANGE: (f32, f32) = (1.0, 6.9);
const PETAL_WIDTH_RANGE: (f32, f32) = (0.1, 2.5);
const COLUMN_COUNT: usize = 5;

/// Load an iris CSV (`sepal.length,sepal.width,petal.length,petal.width,variety`).
///
/// The first line is treated as a header. Malformed rows are skipped and counted.
pub fn load_iris_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut dataset = parse_iris_csv(&text).ok_or_else(|| DatasetError::Empty {
        path: path.to_path_buf(),
    })?;
    dataset.source = Some(path.to_path_buf());
    if dataset.skipped_rows > 0 {
        tracing::warn!(
            "Skipped {} malformed rows in {}",
            dataset.skipped_rows,
            path.display()
        );
    }
    tracing::info!("Loaded {} points from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse iris CSV text. Returns `None` when there is no header line.
pub fn parse_iris_csv(text: &str) -> Option<Dataset> {
    let mut lines = text.lines();
    lines.next()?;
    let mut points = Vec::new();
    let mut skipped_rows = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(point) => points.push(point),
            None => skipped_rows += 1,
        }
    }
    Some(Dataset {
        points,
        skipped_rows,
        source: None,
    })
}

fn parse_row(line: &str) -> Option<LabeledPoint> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != COLUMN_COUNT {
        return None;
    }
    let petal_length = fields[2].parse::<f32>().ok()?;
    let petal_width = fields[3].parse::<f32>().ok()?;
    if !petal_length.is_finite() || !petal_width.is_finite() {
        return None;
    }
    let variety = unquote(fields[4]);
    if variety.is_empty() {
        return None;
    }
    Some(LabeledPoint {
        x: normalize(petal_length, PETAL_LENGTH_RANGE),
        y: normalize(petal_width, PETAL_WIDTH_RANGE),
        label: label_for_variety(variety),
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

fn label_for_variety(variety: &str) -> usize {
    match variety {
        "Setosa" => 0,
        "Versicolor" => 1,
        _ => 2,
    }
}

fn normalize(value: f32, (min, max): (f32, f32)) -> f32 {
    (value - min) / (max - min) * 2.0 - 1.0
}
