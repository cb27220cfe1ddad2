//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config_with_overrides, ExperimentConfig, LossKind, ValidateArgs};

/// Format the adversarial objective as a string
pub fn format_loss_info(config: &ExperimentConfig) -> String {
    let model = &config.model;
    let mut lines = vec![format!("  Model: {}", model.model_name), format!("  Loss: {}", model.loss)];
    if model.loss == LossKind::Wasserstein {
        if let Some(kind) = model.wasserstein_type {
            lines.push(format!("  Wasserstein type: {kind}"));
        }
        lines.push(format!("  Critic steps per generator step: {}", model.effective_n_critic()));
    }
    lines.join("\n")
}

/// Format the training parameters as a string
pub fn format_training_info(config: &ExperimentConfig) -> String {
    let training = &config.training;
    let mut lines = vec![
        format!("  Epochs: {}", training.epochs),
        format!("  Batch size: {}", training.batch_size),
    ];
    if let Some(max_steps) = training.max_steps {
        lines.push(format!("  Max steps: {max_steps}"));
    }
    lines.push(format!("  On non-finite: {}", training.on_non_finite));
    lines.push(format!("  Output dir: {}", training.output_dir.display()));
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let config = load_config_with_overrides(&args.config, &args.overrides)
        .map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "✓ Configuration is valid");
    log(level, LogLevel::Verbose, &format_loss_info(&config));
    log(level, LogLevel::Verbose, &format_training_info(&config));
    Ok(())
}
