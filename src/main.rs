//! gan-train CLI
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! gan-train train configs/wgan.yaml
//!
//! # Train with overrides
//! gan-train train configs/wgan_gp.yaml --epochs 50 --set model.n_critic=3
//!
//! # Resume from a checkpoint
//! gan-train train configs/wgan.yaml --resume runs/wgan/checkpoint_final.json
//!
//! # Validate config
//! gan-train validate configs/dcgan.yaml
//!
//! # Show config info
//! gan-train info configs/wgan_gp.yaml --format json
//! ```

use clap::Parser;
use gan_train::cli::{run_command, Cli, LogLevel};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
