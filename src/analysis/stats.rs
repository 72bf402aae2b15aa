//! Aggregation of per-trial payoff trajectories

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{Error, Result};

/// Elementwise mean and population standard deviation of a set of
/// equal-length trajectories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Curve {
    /// Aggregate `samples` step by step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aggregation`] when there are no samples or when the
    /// samples differ in length.
    pub fn from_samples<S: AsRef<[f64]>>(samples: &[S]) -> Result<Self> {
        let first = samples.first().ok_or_else(|| Error::Aggregation {
            message: "no trials to aggregate".to_string(),
        })?;
        let steps = first.as_ref().len();
        if let Some(bad) = samples.iter().find(|s| s.as_ref().len() != steps) {
            return Err(Error::Aggregation {
                message: format!(
                    "trajectories differ in length ({} vs {})",
                    steps,
                    bad.as_ref().len()
                ),
            });
        }

        let mut mean = Vec::with_capacity(steps);
        let mut std = Vec::with_capacity(steps);
        let mut column = Vec::with_capacity(samples.len());
        for step in 0..steps {
            column.clear();
            column.extend(samples.iter().map(|s| s.as_ref()[step]));
            mean.push(column.iter().mean());
            std.push(column.iter().population_std_dev());
        }
        Ok(Self { mean, std })
    }

    /// Number of steps covered
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Mean and std at the last step
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.mean.last()?, *self.std.last()?))
    }

    /// Mean and std after `step` steps (1-based)
    pub fn at(&self, step: usize) -> Option<(f64, f64)> {
        let index = step.checked_sub(1)?;
        Some((*self.mean.get(index)?, *self.std.get(index)?))
    }
}

/// Mean/std curves of both seats across repeated trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Row player (agent 1)
    pub player1: Curve,
    /// Column player (agent 2)
    pub player2: Curve,
}
