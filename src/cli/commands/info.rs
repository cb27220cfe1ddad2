//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, ExperimentConfig, InfoArgs, OutputFormat};
use crate::data::{build_data_source, DataSource};
use crate::nn::Mlp;

/// Parameter count of an MLP with the given layer widths
fn mlp_parameters(widths: &[usize]) -> usize {
    widths.windows(2).map(|w| w[0] * w[1] + w[1]).sum()
}

/// Human-readable summary of a resolved config
pub fn format_info(config: &ExperimentConfig, sample_dim: usize) -> String {
    let model = &config.model;
    let generator = Mlp::widths(&model.generator, model.latent_dim, sample_dim);
    let critic = Mlp::widths(&model.discriminator, sample_dim, 1);
    let mut lines = vec![
        format!("Model: {}", model.model_name),
        format!("Latent dim: {}", model.latent_dim),
        format!("Loss: {}", model.loss),
    ];
    if let Some(kind) = model.wasserstein_type {
        lines.push(format!("Wasserstein type: {kind}"));
    }
    lines.push(format!("n_critic: {}", model.effective_n_critic()));
    lines.push(format!(
        "Generator: {generator:?} ({} params, {} lr={})",
        mlp_parameters(&generator),
        model.generator.optimizer.name,
        model.generator.optimizer.learning_rate
    ));
    lines.push(format!(
        "Critic: {critic:?} ({} params, {} lr={})",
        mlp_parameters(&critic),
        model.discriminator.optimizer.name,
        model.discriminator.optimizer.learning_rate
    ));
    lines.push(format!("Epochs: {}", config.training.epochs));
    lines.push(format!("Batch size: {}", config.training.batch_size));
    lines.join("\n")
}

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            let data = build_data_source(&config.data, config.training.batch_size, 0)
                .map_err(|e| format!("Data error: {e}"))?;
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("{}", format_info(&config, data.sample_dim()));
            println!("Samples: {} x {}", data.len(), data.sample_dim());
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config).map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mlp_parameters() {
        // 2 -> 3 -> 1: (2*3 + 3) + (3*1 + 1)
        assert_eq!(mlp_parameters(&[2, 3, 1]), 13);
        assert_eq!(mlp_parameters(&[5]), 0);
    }

    #[test]
    fn test_format_info_mentions_both_networks() {
        let config: ExperimentConfig = serde_yaml::from_str(
            "model:\n  model_name: dcgan\n  latent_dim: 100\n  loss: binary_crossentropy\n",
        )
        .unwrap();
        let text = format_info(&config, 2);
        assert!(text.contains("Model: dcgan"));
        assert!(text.contains("n_critic: 1"));
        assert!(text.contains("Generator: [100, 64, 64, 2]"));
        assert!(text.contains("Critic: [2, 64, 64, 1]"));
    }
}
