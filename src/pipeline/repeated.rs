//! Repeated trials aggregated into mean/std payoff curves

use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use super::trial::{StepRecord, TrialResult, run_trial_with};
use crate::{
    Result,
    analysis::{AggregateResult, Curve},
    app::ExperimentConfig,
    game::{Game, NoiseModel, Role},
    ports::{AgentFactory, Observer},
};

/// Seeds for `num_trials` trials, drawn up front from a master generator
/// seeded with `seed`.
pub fn trial_seeds(seed: u64, num_trials: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..num_trials).map(|_| master.random::<u64>()).collect()
}

/// Play one trial with freshly built agents.
///
/// Agent 1 is seeded with `trial_seed`, agent 2 with `trial_seed + 1` and the
/// noise source with `trial_seed + 2` (wrapping).
fn play_trial<F>(
    factory1: &dyn AgentFactory,
    factory2: &dyn AgentFactory,
    game: &Arc<Game>,
    total_steps: usize,
    noise: &NoiseModel,
    trial_seed: u64,
    on_step: F,
) -> Result<TrialResult>
where
    F: FnMut(&StepRecord) -> Result<()>,
{
    let mut agent1 = factory1.build(game, Role::Row, trial_seed);
    let mut agent2 = factory2.build(game, Role::Column, trial_seed.wrapping_add(1));
    let mut rng = StdRng::seed_from_u64(trial_seed.wrapping_add(2));
    log::trace!(
        "{:<32}{} vs {} (seed {})",
        "starting trial",
        agent1.name(),
        agent2.name(),
        trial_seed
    );
    run_trial_with(
        agent1.as_mut(),
        agent2.as_mut(),
        game,
        total_steps,
        noise,
        &mut rng,
        on_step,
    )
}

/// Runs repeated trials between two agent factories
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use repeated_games::{
///     agents::AgentKind,
///     app::ExperimentConfig,
///     game::prisoners_dilemma,
///     pipeline::{ExperimentPipeline, ProgressObserver},
/// };
///
/// let game = Arc::new(prisoners_dilemma()?);
/// let mut pipeline = ExperimentPipeline::new(ExperimentConfig::default())
///     .with_observer(Box::new(ProgressObserver::new()));
/// let result = pipeline.run(&AgentKind::Spam, &AgentKind::Fp, &game)?;
/// println!("{:?}", result.player1.last());
/// # Ok::<(), repeated_games::Error>(())
/// ```
pub struct ExperimentPipeline<'a> {
    config: ExperimentConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> ExperimentPipeline<'a> {
    /// Create a new experiment pipeline
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run `num_repeats` independent trials and aggregate both seats.
    ///
    /// Results are identical whether trials run sequentially or in parallel.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration (zero repeats, noise outside
    /// `[0, 1]`), on an agent seated in the wrong role and on any observer
    /// error.
    pub fn run(
        &mut self,
        factory1: &dyn AgentFactory,
        factory2: &dyn AgentFactory,
        game: &Arc<Game>,
    ) -> Result<AggregateResult> {
        self.config.validate()?;
        let noise = self.config.noise_model()?;
        let num_trials = self.config.num_repeats;
        let total_steps = self.config.total_steps;

        log::info!(
            "{:<32}{} ({} trials x {} steps, noise {}, seed {})",
            "running experiment",
            game.name(),
            num_trials,
            total_steps,
            noise.probability(),
            self.config.seed
        );

        for observer in &mut self.observers {
            observer.on_experiment_start(num_trials, total_steps)?;
        }

        let seeds = trial_seeds(self.config.seed, num_trials);
        let trials = if self.config.parallel {
            let trials = seeds
                .par_iter()
                .map(|&seed| {
                    play_trial(factory1, factory2, game, total_steps, &noise, seed, |_| Ok(()))
                })
                .collect::<Result<Vec<_>>>()?;
            for (trial, result) in trials.iter().enumerate() {
                for observer in &mut self.observers {
                    observer.on_trial_end(trial, result)?;
                }
            }
            trials
        } else {
            let mut trials = Vec::with_capacity(num_trials);
            for (trial, &seed) in seeds.iter().enumerate() {
                for observer in &mut self.observers {
                    observer.on_trial_start(trial)?;
                }
                let observers = &mut self.observers;
                let result =
                    play_trial(factory1, factory2, game, total_steps, &noise, seed, |record| {
                        for observer in observers.iter_mut() {
                            observer.on_step(trial, record)?;
                        }
                        Ok(())
                    })?;
                for observer in &mut self.observers {
                    observer.on_trial_end(trial, &result)?;
                }
                if let Some((p1, p2)) = result.final_averages() {
                    log::debug!("{:<32}{:>3}: {:.4} / {:.4}", "finished trial", trial, p1, p2);
                }
                trials.push(result);
            }
            trials
        };

        let player1: Vec<&[f64]> = trials.iter().map(|t| t.player1.as_slice()).collect();
        let player2: Vec<&[f64]> = trials.iter().map(|t| t.player2.as_slice()).collect();
        let aggregate = AggregateResult {
            player1: Curve::from_samples(&player1)?,
            player2: Curve::from_samples(&player2)?,
        };

        for observer in &mut self.observers {
            observer.on_experiment_end()?;
        }
        if let (Some((m1, _)), Some((m2, _))) = (aggregate.player1.last(), aggregate.player2.last())
        {
            log::info!("{:<32}{:.4} / {:.4}", "final mean payoffs", m1, m2);
        }
        Ok(aggregate)
    }
}

/// Repeat `run_trial` `num_repeats` times with fresh agents and aggregate.
///
/// Agents for trial `i` come from `factory1` (row) and `factory2` (column),
/// seeded from the `i`-th draw of a master generator seeded with `seed`.
pub fn run_repeated(
    factory1: &dyn AgentFactory,
    factory2: &dyn AgentFactory,
    game: &Arc<Game>,
    num_repeats: usize,
    total_steps: usize,
    noise: f64,
    seed: u64,
) -> Result<AggregateResult> {
    let config = ExperimentConfig::default()
        .with_num_repeats(num_repeats)
        .with_total_steps(total_steps)
        .with_noise(noise)
        .with_seed(seed);
    ExperimentPipeline::new(config).run(factory1, factory2, game)
}
