//! The phase loop

use std::time::Instant;

use tracing::{debug, info, warn};

use super::core::GanTrainer;
use super::result::{EpochAccumulator, TrainingSummary};
use crate::data::DataSource;
use crate::error::{Error, Result};
use crate::generative::StepError;
use crate::train::callback::EpochContext;
use crate::train::{AdversarialSteps, NumericalPolicy, Phase};

/// Why the loop stopped before running out of epochs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Cancelled,
    StepLimit,
}

/// Run-wide counters
#[derive(Debug, Default)]
struct RunTotals {
    critic_steps: u64,
    generator_steps: u64,
    skipped_steps: u64,
    final_critic_loss: Option<f32>,
    final_generator_loss: Option<f32>,
}

impl GanTrainer {
    /// Train until the epoch limit, the step limit or cancellation.
    ///
    /// Returns `Error::NumericalInstability` only under
    /// [`NumericalPolicy::Abort`], after `on_train_end` has seen the state as
    /// of the failed step. Callback failures are logged and ignored.
    pub fn run<S, D>(&mut self, steps: &mut S, data: &mut D) -> Result<TrainingSummary>
    where
        S: AdversarialSteps + ?Sized,
        D: DataSource + ?Sized,
    {
        let start = Instant::now();
        let n_critic = steps.n_critic().max(1);
        let mut totals = RunTotals::default();
        let mut epoch = EpochAccumulator::default();

        // A resumed run picks up at the pending step phase; anything else restarts the critic phase
        let mut phase = match self.state.phase {
            Phase::GeneratorPhase => Phase::GeneratorPhase,
            _ => Phase::CriticPhase,
        };
        info!(
            max_epochs = self.limits.max_epochs,
            max_steps = ?self.limits.max_steps,
            n_critic,
            start_epoch = self.state.epoch,
            policy = %self.policy,
            "Starting adversarial training"
        );
        self.state.phase = Phase::Initializing;
        self.callbacks.on_train_begin(&self.state);
        data.reset();

        let mut stop = None;
        let mut failure = None;
        if self.state.epoch >= self.limits.max_epochs {
            phase = Phase::Terminated;
        }

        while phase != Phase::Terminated {
            self.state.phase = phase;
            if matches!(phase, Phase::CriticPhase | Phase::GeneratorPhase) {
                stop = self.stop_reason();
                if stop.is_some() {
                    break;
                }
            }

            phase = match phase {
                Phase::CriticPhase => match data.next_batch() {
                    None => Phase::EpochBoundary,
                    Some(real) if real.nrows() == 0 => {
                        debug!(epoch = self.state.epoch, "Skipping empty real batch");
                        Phase::CriticPhase
                    }
                    Some(real) => {
                        let result = steps.critic_step(real);
                        self.state.global_step += 1;
                        totals.critic_steps += 1;
                        let loss = match self.accept(result, &mut totals) {
                            Ok(loss) => loss,
                            Err(err) => {
                                failure = Some(err);
                                break;
                            }
                        };
                        if loss.is_some() {
                            totals.final_critic_loss = loss;
                        }
                        epoch.critic(loss);

                        self.state.critic_substep += 1;
                        if self.state.critic_substep >= n_critic {
                            self.state.critic_substep = 0;
                            Phase::GeneratorPhase
                        } else {
                            Phase::CriticPhase
                        }
                    }
                },
                Phase::GeneratorPhase => {
                    let result = steps.generator_step(data.batch_size());
                    self.state.global_step += 1;
                    totals.generator_steps += 1;
                    let loss = match self.accept(result, &mut totals) {
                        Ok(loss) => loss,
                        Err(err) => {
                            failure = Some(err);
                            break;
                        }
                    };
                    if loss.is_some() {
                        totals.final_generator_loss = loss;
                    }
                    epoch.generator(loss);
                    Phase::CriticPhase
                }
                Phase::EpochBoundary => {
                    let report = epoch.finish(self.state.epoch, self.state.global_step);
                    info!(
                        epoch = report.epoch + 1,
                        critic_loss = ?report.critic_loss,
                        generator_loss = ?report.generator_loss,
                        critic_steps = report.critic_steps,
                        generator_steps = report.generator_steps,
                        global_step = report.global_step,
                        "Epoch complete"
                    );

                    self.state.epoch += 1;
                    self.state.phase = Phase::CriticPhase;
                    let checkpoint = if self.callbacks.needs_checkpoint() {
                        steps.snapshot(&self.state)
                    } else {
                        None
                    };
                    self.callbacks.on_epoch_end(&EpochContext {
                        report: &report,
                        max_epochs: self.limits.max_epochs,
                        state: &self.state,
                        checkpoint: checkpoint.as_ref(),
                    });
                    self.history.push(report);

                    if self.state.epoch >= self.limits.max_epochs {
                        Phase::Terminated
                    } else {
                        data.reset();
                        Phase::CriticPhase
                    }
                }
                Phase::Initializing | Phase::Terminated => Phase::Terminated,
            };
        }

        let summary = TrainingSummary {
            epochs_completed: self.state.epoch,
            global_step: self.state.global_step,
            critic_steps: totals.critic_steps,
            generator_steps: totals.generator_steps,
            skipped_steps: totals.skipped_steps,
            final_critic_loss: totals.final_critic_loss,
            final_generator_loss: totals.final_generator_loss,
            cancelled: stop == Some(Stop::Cancelled),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        match stop {
            Some(Stop::Cancelled) => info!(global_step = summary.global_step, "Training cancelled"),
            Some(Stop::StepLimit) => info!(global_step = summary.global_step, "Step limit reached"),
            None => {}
        }
        if let Some(err) = &failure {
            warn!(global_step = summary.global_step, error = %err, "Training aborted");
        }

        // Snapshot the pending phase so a resumed run continues where this one stopped
        let checkpoint = if self.callbacks.needs_checkpoint() {
            if self.state.phase != Phase::GeneratorPhase {
                self.state.phase = Phase::CriticPhase;
            }
            steps.snapshot(&self.state)
        } else {
            None
        };
        self.state.phase = Phase::Terminated;
        self.callbacks.on_train_end(&summary, checkpoint.as_ref());

        info!(
            epochs = summary.epochs_completed,
            global_step = summary.global_step,
            skipped_steps = summary.skipped_steps,
            elapsed_secs = summary.elapsed_secs,
            "Training finished"
        );
        match failure {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }

    fn stop_reason(&self) -> Option<Stop> {
        if self.cancel.is_cancelled() {
            return Some(Stop::Cancelled);
        }
        match self.limits.max_steps {
            Some(max) if self.state.global_step >= max => Some(Stop::StepLimit),
            _ => None,
        }
    }

    /// Apply the numerical policy to a step result
    fn accept(&mut self, result: std::result::Result<f32, StepError>, totals: &mut RunTotals) -> Result<Option<f32>> {
        match result {
            Ok(loss) => Ok(Some(loss)),
            Err(err) => match self.policy {
                NumericalPolicy::Skip => {
                    totals.skipped_steps += 1;
                    warn!(
                        phase = %err.phase(),
                        epoch = self.state.epoch,
                        global_step = self.state.global_step,
                        error = %err,
                        "Skipping step"
                    );
                    Ok(None)
                }
                NumericalPolicy::Abort => Err(Error::NumericalInstability(err)),
            },
        }
    }
}
