//! Per-feature min-max scaling

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Target range of [`normalise`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalisation {
    /// `[0, 1]`
    ZeroOne,
    /// `[-1, 1]`, matching a tanh generator output
    NegOneOne,
}

impl Normalisation {
    fn bounds(self) -> (f32, f32) {
        match self {
            Self::ZeroOne => (0.0, 1.0),
            Self::NegOneOne => (-1.0, 1.0),
        }
    }
}

/// Scale each column into the target range. Constant columns map to the
/// middle of the range.
pub fn normalise(samples: &mut Array2<f32>, target: Normalisation) {
    let (lo, hi) = target.bounds();
    for mut column in samples.axis_iter_mut(Axis(1)) {
        let min = column.iter().copied().fold(f32::INFINITY, f32::min);
        let max = column.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let span = max - min;
        if span > 0.0 {
            column.mapv_inplace(|x| lo + (x - min) / span * (hi - lo));
        } else {
            column.fill((lo + hi) / 2.0);
        }
    }
}
