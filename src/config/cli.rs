//! Command-line interface types

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// gan-train: configuration-driven adversarial training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gan-train")]
#[command(version)]
#[command(about = "Train DCGAN, WGAN and WGAN-GP models from YAML experiment configs")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train a GAN from a YAML experiment config
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Display the resolved configuration and network sizes
    Info(InfoArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a config value, e.g. `--set model.n_critic=5` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Resume from a session checkpoint
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry run (validate config and build networks, but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override a config value before validating (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Output format for the info command
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Resolved config as JSON
    Json,
    /// Resolved config as YAML
    Yaml,
}

/// Parse arguments from an iterator (used by tests)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_with_overrides() {
        let cli = parse_args([
            "gan-train",
            "train",
            "configs/wgan_gp.yaml",
            "--set",
            "model.n_critic=3",
            "--set",
            "training.batch_size=16",
            "--epochs",
            "2",
            "--seed",
            "7",
        ])
        .unwrap();

        let Command::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.config, PathBuf::from("configs/wgan_gp.yaml"));
        assert_eq!(args.overrides, vec!["model.n_critic=3", "training.batch_size=16"]);
        assert_eq!(args.epochs, Some(2));
        assert_eq!(args.seed, Some(7));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["gan-train", "validate", "c.yaml", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn test_missing_config_is_error() {
        assert!(parse_args(["gan-train", "train"]).is_err());
        assert!(parse_args(["gan-train", "frobnicate", "x.yaml"]).is_err());
    }

    #[test]
    fn test_info_command() {
        let cli = parse_args(["gan-train", "-q", "info", "c.yaml"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(
            cli.command,
            Command::Info(InfoArgs { config: PathBuf::from("c.yaml"), format: OutputFormat::Text })
        );
    }

    #[test]
    fn test_info_format_and_resume() {
        let cli = parse_args(["gan-train", "info", "c.yaml", "--format", "json"]).unwrap();
        let Command::Info(args) = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(args.format, OutputFormat::Json);

        let cli = parse_args(["gan-train", "train", "c.yaml", "--resume", "out/checkpoint_final.json"]).unwrap();
        let Command::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.resume, Some(PathBuf::from("out/checkpoint_final.json")));
    }
}
