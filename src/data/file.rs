//! JSON sample files: `[[f32, ...], ...]`

use ndarray::Array2;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Load a JSON array of equally sized rows into `[rows, features]`
pub fn load_json_samples<P: AsRef<Path>>(path: P) -> Result<Array2<f32>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Data(format!("Failed to read samples {}: {e}", path.display())))?;
    let rows: Vec<Vec<f32>> = serde_json::from_str(&content)?;

    let Some(width) = rows.first().map(Vec::len) else {
        return Err(Error::Data(format!("{} contains no samples", path.display())));
    };
    if width == 0 {
        return Err(Error::Data(format!("{}: samples have no features", path.display())));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(Error::Data(format!(
            "{}: row {i} has {} values, expected {width}",
            path.display(),
            row.len()
        )));
    }

    let n = rows.len();
    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, width), flat).map_err(|e| Error::Data(e.to_string()))
}
