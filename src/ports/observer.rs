//! Observer port - abstraction for experiment observation and data collection
//!
//! This port defines the interface for observing simulation events,
//! allowing composable data collection without coupling the harness
//! to specific output formats or metrics.

use crate::{
    Result,
    pipeline::{StepRecord, TrialResult},
};

/// Observer trait for monitoring experiments
///
/// # Event Sequence
///
/// 1. `on_experiment_start(num_trials, total_steps)` - Once at the beginning
/// 2. For each trial:
///    - `on_trial_start(trial)`
///    - `on_step(trial, record)` - For each simulated step
///    - `on_trial_end(trial, result)`
/// 3. `on_experiment_end()` - Once at the end
///
/// When trials run in parallel only `on_trial_end` is delivered per trial,
/// in trial order, after all trials have finished.
///
/// # Examples
///
/// ```no_run
/// use repeated_games::{pipeline::TrialResult, ports::Observer};
///
/// struct TrialCounter {
///     trials: usize,
/// }
///
/// impl Observer for TrialCounter {
///     fn on_trial_end(&mut self, _trial: usize, _result: &TrialResult) -> repeated_games::Result<()> {
///         self.trials += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first trial.
    fn on_experiment_start(&mut self, _num_trials: usize, _total_steps: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a trial starts (sequential execution only).
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every simulated step (sequential execution only).
    ///
    /// The record carries intended and executed actions of both players and
    /// the realized payoffs, before the agents are updated.
    fn on_step(&mut self, _trial: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when a trial completes.
    fn on_trial_end(&mut self, _trial: usize, _result: &TrialResult) -> Result<()> {
        Ok(())
    }

    /// Called once after the last trial.
    fn on_experiment_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller keep ownership of an observer and read it back after a run.
impl<T: Observer + ?Sized> Observer for &mut T {
    fn on_experiment_start(&mut self, num_trials: usize, total_steps: usize) -> Result<()> {
        (**self).on_experiment_start(num_trials, total_steps)
    }

    fn on_trial_start(&mut self, trial: usize) -> Result<()> {
        (**self).on_trial_start(trial)
    }

    fn on_step(&mut self, trial: usize, record: &StepRecord) -> Result<()> {
        (**self).on_step(trial, record)
    }

    fn on_trial_end(&mut self, trial: usize, result: &TrialResult) -> Result<()> {
        (**self).on_trial_end(trial, result)
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        (**self).on_experiment_end()
    }
}
