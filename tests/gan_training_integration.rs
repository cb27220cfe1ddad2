//! End-to-end adversarial training from the shipped YAML configs
//!
//! Each run shrinks the shipped experiment through `--set` style overrides so
//! the full pipeline (config merge, data, session, trainer, callbacks) runs in
//! well under a second.

use std::fs;
use std::path::{Path, PathBuf};

use gan_train::config::{load_config, load_config_with_overrides, train_from_config, RunOptions};
use gan_train::generative::{LossVariant, SessionCheckpoint};
use gan_train::train::{CancellationToken, Phase};
use tempfile::TempDir;

fn shipped(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("configs").join(name)
}

fn small_overrides(out: &Path) -> Vec<String> {
    vec![
        "training.epochs=2".to_string(),
        "training.batch_size=16".to_string(),
        "training.seed=11".to_string(),
        "training.save_interval=1".to_string(),
        format!("training.output_dir={}", out.display()),
        "data.samples=64".to_string(),
        "model.latent_dim=4".to_string(),
        "model.generator.channels=8".to_string(),
        "model.generator.layers=1".to_string(),
        "model.discriminator.channels=8".to_string(),
        "model.discriminator.layers=1".to_string(),
    ]
}

#[test]
fn test_shipped_configs_load() {
    let dcgan = load_config(shipped("dcgan.yaml")).unwrap();
    assert_eq!(dcgan.model.latent_dim, 100);
    assert_eq!(dcgan.model.effective_n_critic(), 1);

    let wgan = load_config(shipped("wgan.yaml")).unwrap();
    assert_eq!(wgan.model.clip_value, Some(0.01));
    assert_eq!(wgan.model.effective_n_critic(), 5);
    // Inherited from base.yaml through `extends`
    assert_eq!(wgan.model.generator.optimizer.beta_2, 0.999);

    let gp = load_config(shipped("wgan_gp.yaml")).unwrap();
    assert_eq!(gp.model.gradient_penalty, Some(10.0));
    assert_eq!(gp.model.discriminator.optimizer.beta_1, 0.0);
}

#[test]
fn test_dcgan_trains_one_to_one() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dcgan");
    let config = load_config_with_overrides(shipped("dcgan.yaml"), &small_overrides(&out)).unwrap();

    let outcome = train_from_config(&config, &RunOptions::default()).unwrap();
    let summary = &outcome.summary;
    assert_eq!(outcome.session.strategy().variant(), LossVariant::Standard);
    assert_eq!(summary.epochs_completed, 2);
    assert_eq!(summary.critic_steps, 8);
    assert_eq!(summary.generator_steps, 8);
    assert_eq!(summary.global_step, 16);
    assert!(!summary.cancelled);
    assert!(summary.final_critic_loss.unwrap().is_finite());
}

#[test]
fn test_wgan_clip_keeps_critic_bounded() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("wgan");
    let config = load_config_with_overrides(shipped("wgan.yaml"), &small_overrides(&out)).unwrap();

    let outcome = train_from_config(&config, &RunOptions::default()).unwrap();
    // 8 critic batches with n_critic = 5 and the substep carried over the epoch boundary
    assert_eq!(outcome.summary.critic_steps, 8);
    assert_eq!(outcome.summary.generator_steps, 1);
    for weight in outcome.session.critic().weights() {
        assert!(weight.iter().all(|w| w.abs() <= 0.01));
    }

    for epoch in 0..2 {
        assert!(out.join(format!("checkpoint_epoch_{epoch}.json")).exists());
    }
    let metrics = fs::read_to_string(out.join("metrics.jsonl")).unwrap();
    assert_eq!(metrics.lines().count(), 2);

    let last = SessionCheckpoint::load(out.join("checkpoint_final.json")).unwrap();
    assert_eq!(last.loss_variant, LossVariant::WeightClipped);
    assert_eq!(last.state.epoch, 2);
    assert_eq!(last.seed, 11);
}

#[test]
fn test_wgan_gp_trains_and_resumes() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("gp");
    let mut overrides = small_overrides(&out);
    overrides.push("model.n_critic=2".to_string());
    let config = load_config_with_overrides(shipped("wgan_gp.yaml"), &overrides).unwrap();

    let first = train_from_config(&config, &RunOptions::default()).unwrap();
    assert_eq!(first.session.strategy().variant(), LossVariant::GradientPenalty);
    assert_eq!(first.summary.critic_steps, 8);
    assert_eq!(first.summary.generator_steps, 4);
    assert!(first.summary.final_generator_loss.unwrap().is_finite());

    let mut longer = config.clone();
    longer.training.epochs = 3;
    let options = RunOptions {
        resume: Some(out.join("checkpoint_final.json")),
        ..RunOptions::default()
    };
    let resumed = train_from_config(&longer, &options).unwrap();
    assert_eq!(resumed.summary.epochs_completed, 3);
    assert_eq!(resumed.summary.global_step, 12 + 6);
}

#[test]
fn test_cancelled_run_takes_no_steps() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("cancelled");
    let config = load_config_with_overrides(shipped("wgan.yaml"), &small_overrides(&out)).unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let options = RunOptions {
        cancellation: Some(token),
        ..RunOptions::default()
    };
    let outcome = train_from_config(&config, &options).unwrap();
    assert!(outcome.summary.cancelled);
    assert_eq!(outcome.summary.global_step, 0);

    let last = SessionCheckpoint::load(out.join("checkpoint_final.json")).unwrap();
    assert_eq!(last.state.phase, Phase::CriticPhase);
}
