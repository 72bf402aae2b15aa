//! Shared argument groups for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    app::ExperimentConfig,
    game::{GAME_NAMES, Game, MatrixSpec, game_by_name},
};

/// Experiment parameters; flags override values from `--config`
#[derive(Args, Debug, Clone)]
pub struct ExperimentArgs {
    /// JSON experiment configuration to start from
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rounds per trial
    #[arg(long, short = 's')]
    pub steps: Option<usize>,

    /// Number of independent trials
    #[arg(long, short = 'r')]
    pub repeats: Option<usize>,

    /// Probability that an intended action is replaced
    #[arg(long, short = 'n')]
    pub noise: Option<f64>,

    /// Master random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl ExperimentArgs {
    /// Build the validated experiment configuration
    pub fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => ExperimentConfig::default(),
        };
        if let Some(steps) = self.steps {
            config = config.with_total_steps(steps);
        }
        if let Some(repeats) = self.repeats {
            config = config.with_num_repeats(repeats);
        }
        if let Some(noise) = self.noise {
            config = config.with_noise(noise);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        config.validate().context("invalid experiment configuration")?;
        Ok(config)
    }
}

/// Game selection: a built-in game or a JSON matrix file
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Built-in game (pd, chicken, tricky)
    #[arg(long, short = 'g', default_value = "pd", conflicts_with = "matrix")]
    pub game: String,

    /// JSON payoff matrix describing a custom game
    #[arg(long)]
    pub matrix: Option<PathBuf>,
}

impl GameArgs {
    pub fn load(&self) -> Result<Game> {
        match &self.matrix {
            Some(path) => MatrixSpec::load(path)
                .with_context(|| format!("loading payoff matrix from {}", path.display())),
            None => game_by_name(&self.game)
                .with_context(|| format!("built-in games: {}", GAME_NAMES.join(", "))),
        }
    }
}
