//! CLI module for gan-train
//!
//! Command handlers behind the `gan-train` binary.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
