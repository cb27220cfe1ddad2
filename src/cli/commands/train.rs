//! Train command implementation

use std::fs;
use std::sync::OnceLock;

use tracing::warn;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config_with_overrides, train_from_config, RunOptions, TrainArgs};
use crate::data::{build_data_source, DataSource};
use crate::generative::TrainingSession;
use crate::train::CancellationToken;

/// Samples written next to the checkpoints after training
const SAMPLE_COUNT: usize = 256;

/// Process-wide token flipped by Ctrl-C. The handler is installed once.
fn interrupt_token() -> CancellationToken {
    static TOKEN: OnceLock<CancellationToken> = OnceLock::new();
    TOKEN
        .get_or_init(|| {
            let token = CancellationToken::new();
            let handle = token.clone();
            if let Err(e) = ctrlc::set_handler(move || {
                eprintln!("\nInterrupted, finishing current step...");
                handle.cancel();
            }) {
                warn!(error = %e, "Failed to set Ctrl-C handler");
            }
            token
        })
        .clone()
}

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    run_train_with(args, level, interrupt_token())
}

/// Train with an explicit cancellation token
pub(super) fn run_train_with(args: TrainArgs, level: LogLevel, cancellation: CancellationToken) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("gan-train: Training from {}", args.config.display()));

    let mut overrides = args.overrides.clone();
    if let Some(epochs) = args.epochs {
        overrides.push(format!("training.epochs={epochs}"));
    }
    if let Some(seed) = args.seed {
        overrides.push(format!("training.seed={seed}"));
    }
    if let Some(dir) = &args.output_dir {
        overrides.push(format!("training.output_dir={}", dir.display()));
    }
    let config = load_config_with_overrides(&args.config, &overrides).map_err(|e| format!("Config error: {e}"))?;

    if args.dry_run {
        let seed = config.training.seed.unwrap_or(0);
        let data = build_data_source(&config.data, config.training.batch_size, seed)
            .map_err(|e| format!("Data error: {e}"))?;
        let session = TrainingSession::new(&config.model, data.sample_dim(), seed)
            .map_err(|e| format!("Config error: {e}"))?;

        log(level, LogLevel::Normal, "Dry run - config validated and networks built");
        log(level, LogLevel::Verbose, &format!("  Model: {}", config.model.model_name));
        log(level, LogLevel::Verbose, &format!("  Loss: {}", session.strategy().variant()));
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Parameters: generator {}, critic {}",
                session.generator().network.parameter_count(),
                session.critic().network.parameter_count()
            ),
        );
        log(level, LogLevel::Verbose, &format!("  Samples: {} x {}", data.len(), data.sample_dim()));
        log(level, LogLevel::Verbose, &format!("  Epochs: {}", config.training.epochs));
        return Ok(());
    }

    let options = RunOptions { resume: args.resume.clone(), cancellation: Some(cancellation) };
    let mut outcome = train_from_config(&config, &options).map_err(|e| format!("Training error: {e}"))?;

    let summary = &outcome.summary;
    if summary.cancelled {
        log(level, LogLevel::Normal, "Training interrupted, final checkpoint kept");
    } else {
        log(level, LogLevel::Normal, "Training complete!");
    }
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Epochs: {}, steps: {} ({} skipped)",
            summary.epochs_completed, summary.global_step, summary.skipped_steps
        ),
    );
    log(level, LogLevel::Verbose, &format!("  Seed: {}", outcome.seed));

    let samples = outcome.session.sample(SAMPLE_COUNT);
    let out_dir = &config.training.output_dir;
    let path = out_dir.join("samples.json");
    fs::create_dir_all(out_dir).map_err(|e| format!("Output error: {e}"))?;
    let rows: Vec<Vec<f32>> = samples.outer_iter().map(|row| row.to_vec()).collect();
    let json = serde_json::to_string(&rows).map_err(|e| format!("JSON serialization error: {e}"))?;
    fs::write(&path, json).map_err(|e| format!("Output error: {e}"))?;
    log(level, LogLevel::Normal, &format!("  Samples: {}", path.display()));
    Ok(())
}
