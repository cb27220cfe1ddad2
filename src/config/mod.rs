//! Experiment configuration
//!
//! - [`schema`]: serde types for the YAML experiment file
//! - [`loader`]: `extends:` inheritance and `--set key=value` overrides
//! - [`validate`]: eager checks run once before anything is built
//! - [`cli`]: clap argument types for the `gan-train` binary

pub mod cli;
pub mod loader;
pub mod schema;
mod train;
pub mod validate;

pub use cli::{parse_args, Cli, Command, InfoArgs, OutputFormat, TrainArgs, ValidateArgs};
pub use loader::{apply_override, load_config, load_config_with_overrides, load_merged_value, merge_values};
pub use schema::{
    DataConfig, ExperimentConfig, LossKind, ModelConfig, NetworkSpec, OptimizerKind, OptimizerSpec,
    TrainingParams, WassersteinType,
};
pub use train::{train_from_config, train_from_yaml, RunOptions, TrainingOutcome};
pub use validate::{validate_config, validate_model, ValidationError};
