//! Observer implementations for experiment pipelines
//!
//! Observers allow composable data collection during an experiment without
//! coupling the harness to specific output formats.

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::trial::{StepRecord, TrialResult};
use crate::{Result, game::ActionId, ports::Observer};

/// Progress bar observer - Shows trial progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    label: String,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self::with_label("trials")
    }

    /// Create a progress observer whose bar is suffixed with `label`
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            progress_bar: None,
            label: label.into(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_experiment_start(&mut self, num_trials: usize, _total_steps: usize) -> Result<()> {
        let pb = ProgressBar::new(num_trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {} {{msg}}",
                    self.label
                ))
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, result: &TrialResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(trial as u64 + 1);
            if let Some((p1, p2)) = result.final_averages() {
                pb.set_message(format!("(last {p1:.3} / {p2:.3})"));
            }
        }
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
        Ok(())
    }
}

/// Metrics observer - Tracks execution and outcome statistics
///
/// Step-level counts (joint actions, perturbations) are only available when
/// trials run sequentially.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    trials: usize,
    steps: usize,
    perturbed: usize,
    joint_actions: BTreeMap<(ActionId, ActionId), usize>,
    final_sums: (f64, f64),
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of individual action executions that differed from the
    /// intended action
    pub fn perturbation_rate(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.perturbed as f64 / (2 * self.steps) as f64
        }
    }

    /// Relative frequency of every executed joint action, in id order
    pub fn joint_action_frequencies(&self) -> Vec<((ActionId, ActionId), f64)> {
        self.joint_actions
            .iter()
            .map(|(&joint, &count)| (joint, count as f64 / self.steps as f64))
            .collect()
    }

    /// Mean over trials of each seat's final average payoff
    pub fn mean_final_payoffs(&self) -> Option<(f64, f64)> {
        if self.trials == 0 {
            return None;
        }
        let n = self.trials as f64;
        Some((self.final_sums.0 / n, self.final_sums.1 / n))
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            trials: self.trials,
            steps: self.steps,
            perturbation_rate: self.perturbation_rate(),
            joint_action_frequencies: self.joint_action_frequencies(),
            mean_final_payoffs: self.mean_final_payoffs(),
        }
    }
}

/// Summary of experiment metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub trials: usize,
    pub steps: usize,
    pub perturbation_rate: f64,
    pub joint_action_frequencies: Vec<((ActionId, ActionId), f64)>,
    pub mean_final_payoffs: Option<(f64, f64)>,
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, _trial: usize, record: &StepRecord) -> Result<()> {
        self.steps += 1;
        self.perturbed += record.perturbations();
        *self.joint_actions.entry(record.executed).or_insert(0) += 1;
        Ok(())
    }

    fn on_trial_end(&mut self, _trial: usize, result: &TrialResult) -> Result<()> {
        self.trials += 1;
        if let Some((p1, p2)) = result.final_averages() {
            self.final_sums.0 += p1;
            self.final_sums.1 += p2;
        }
        Ok(())
    }
}
