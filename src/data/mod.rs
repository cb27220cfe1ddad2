//! Real-sample sources
//!
//! A [`DataSource`] yields real batches for one epoch and then `None`; the
//! trainer calls [`DataSource::reset`] at the start of every epoch. Running
//! out of data is the normal end-of-epoch signal, not an error.

mod batch;
mod file;
mod memory;
mod normalise;
mod ring;

pub use batch::Batch;
pub use file::load_json_samples;
pub use memory::InMemoryDataSource;
pub use normalise::{normalise, Normalisation};
pub use ring::ring_samples;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DataConfig;
use crate::error::Result;

/// Finite-per-epoch, restartable sequence of real batches
pub trait DataSource {
    /// Next `[rows, sample_dim]` batch, or `None` once the epoch is exhausted
    fn next_batch(&mut self) -> Option<Array2<f32>>;

    /// Start a new epoch
    fn reset(&mut self);

    /// Features per sample
    fn sample_dim(&self) -> usize;

    /// Nominal rows per batch (the last batch of an epoch may be smaller)
    fn batch_size(&self) -> usize;

    /// Samples per epoch
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
    fn next_batch(&mut self) -> Option<Array2<f32>> {
        (**self).next_batch()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn sample_dim(&self) -> usize {
        (**self).sample_dim()
    }

    fn batch_size(&self) -> usize {
        (**self).batch_size()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Build the configured data source. `seed` drives both synthetic sampling
/// and per-epoch shuffling.
pub fn build_data_source(config: &DataConfig, batch_size: usize, seed: u64) -> Result<InMemoryDataSource> {
    let samples = match config {
        DataConfig::Ring { modes, radius, std, samples } => {
            let mut rng = StdRng::seed_from_u64(seed);
            ring_samples(&mut rng, *modes, *radius, *std, *samples)
        }
        DataConfig::File { path, normalise: scaling } => {
            let mut samples = load_json_samples(path)?;
            if let Some(scaling) = scaling {
                normalise(&mut samples, *scaling);
            }
            samples
        }
    };
    InMemoryDataSource::new(samples, batch_size, seed.wrapping_add(1))
}
