//! Experiment configuration.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, game::NoiseModel};

/// Parameters of a repeated experiment.
///
/// This type provides a builder-style API; every field has a default that
/// reproduces the reference setup (500 steps, 10 repeats, 5% noise, seed
/// 12345, sequential trials).
///
/// # Examples
///
/// ```
/// use repeated_games::app::ExperimentConfig;
///
/// let config = ExperimentConfig::default()
///     .with_total_steps(200)
///     .with_num_repeats(4)
///     .with_noise(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Rounds played per trial
    pub total_steps: usize,
    /// Independent trials averaged into each curve
    pub num_repeats: usize,
    /// Probability that an intended action is replaced by another one
    pub noise: f64,
    /// Master seed; every trial seed is drawn from it
    pub seed: u64,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            total_steps: 500,
            num_repeats: 10,
            noise: 0.05,
            seed: 12345,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    /// Set the number of rounds per trial.
    pub fn with_total_steps(mut self, total_steps: usize) -> Self {
        self.total_steps = total_steps;
        self
    }

    /// Set the number of trials.
    pub fn with_num_repeats(mut self, num_repeats: usize) -> Self {
        self.num_repeats = num_repeats;
        self
    }

    /// Set the execution noise probability.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run trials in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Noise model described by this configuration.
    pub fn noise_model(&self) -> Result<NoiseModel> {
        NoiseModel::new(self.noise)
    }

    /// Check that the configuration describes a runnable experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero repeats and
    /// [`Error::InvalidNoise`] for a noise probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.num_repeats == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_repeats must be at least 1".to_string(),
            });
        }
        self.noise_model()?;
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
