//! Execution noise: the action a player intends is not always the action it plays

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::actions::{ActionId, ActionSet};
use crate::{Error, Result};

/// Per-step perturbation of intended actions.
///
/// With probability `1 - probability` the intended action is executed;
/// otherwise a different action is drawn uniformly from the action set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    probability: f64,
}

impl NoiseModel {
    /// Create a noise model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoise`] unless `probability` lies in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidNoise { value: probability });
        }
        Ok(Self { probability })
    }

    /// Noise-free execution
    pub fn none() -> Self {
        Self { probability: 0.0 }
    }

    /// Perturbation probability
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Map an intended action to the executed one.
    ///
    /// A single-action set always executes the intended action.
    pub fn execute<R: Rng + ?Sized>(
        &self,
        intended: ActionId,
        actions: &ActionSet,
        rng: &mut R,
    ) -> ActionId {
        if rng.random::<f64>() < 1.0 - self.probability {
            return intended;
        }
        let others: Vec<ActionId> = actions.ids().filter(|&id| id != intended).collect();
        others.choose(rng).copied().unwrap_or(intended)
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self { probability: 0.05 }
    }
}
