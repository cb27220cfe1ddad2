//! Shuffled in-memory dataset

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DataSource;
use crate::error::{Error, Result};

/// Rows of a sample matrix served in shuffled batches.
///
/// Every epoch visits every row exactly once; the final batch keeps the
/// remainder rather than dropping it.
#[derive(Debug, Clone)]
pub struct InMemoryDataSource {
    samples: Array2<f32>,
    batch_size: usize,
    order: Vec<usize>,
    cursor: usize,
    shuffle: bool,
    rng: StdRng,
}

impl InMemoryDataSource {
    /// Shuffling source seeded with `seed`
    pub fn new(samples: Array2<f32>, batch_size: usize, seed: u64) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Data("batch_size must be > 0".to_string()));
        }
        if samples.ncols() == 0 {
            return Err(Error::Data("samples must have at least one feature".to_string()));
        }
        let mut source = Self {
            order: (0..samples.nrows()).collect(),
            samples,
            batch_size,
            cursor: 0,
            shuffle: true,
            rng: StdRng::seed_from_u64(seed),
        };
        source.reset();
        Ok(source)
    }

    /// Serve rows in their stored order
    pub fn sequential(mut self) -> Self {
        self.shuffle = false;
        self.order = (0..self.samples.nrows()).collect();
        self.cursor = 0;
        self
    }

    pub fn samples(&self) -> &Array2<f32> {
        &self.samples
    }

    /// Batches per epoch, counting a trailing partial batch
    pub fn batches_per_epoch(&self) -> usize {
        self.samples.nrows().div_ceil(self.batch_size)
    }
}

impl DataSource for InMemoryDataSource {
    fn next_batch(&mut self) -> Option<Array2<f32>> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let rows = &self.order[self.cursor..end];
        self.cursor = end;
        Some(self.samples.select(Axis(0), rows))
    }

    fn reset(&mut self) {
        self.cursor = 0;
        if self.shuffle {
            self.order.shuffle(&mut self.rng);
        }
    }

    fn sample_dim(&self) -> usize {
        self.samples.ncols()
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn len(&self) -> usize {
        self.samples.nrows()
    }
}
