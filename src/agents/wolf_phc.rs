//! WoLF-PHC: win-or-learn-fast policy hill climbing
//!
//! Keeps a stateless value estimate per action and climbs the policy toward
//! the greedy actions, stepping slowly while the current policy outperforms
//! the running average policy and quickly otherwise.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    game::{ActionId, Game, Role},
    ports::{Agent, Outcome},
    utils::{argmax_all, normalize_weights, weighted_sample},
};

/// TD learning rate for the value estimates
pub const VALUE_LEARNING_RATE: f64 = 0.1;
/// Discount applied to the policy-weighted value of the next round
pub const DISCOUNT: f64 = 0.95;
/// Policy step while winning
pub const ALPHA_WIN: f64 = 0.01;
/// Policy step while losing
pub const ALPHA_LOSE: f64 = 0.05;

/// Policy hill climber with a win-or-learn-fast step size
#[derive(Debug, Clone)]
pub struct WolfPhcAgent {
    game: Arc<Game>,
    role: Role,
    policy: Vec<f64>,
    average_policy: Vec<f64>,
    values: Vec<f64>,
    /// Number of updates applied
    t: u64,
    rng: StdRng,
}

fn expectation(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

impl WolfPhcAgent {
    /// Create a WoLF-PHC agent with a uniform policy
    pub fn new(game: Arc<Game>, role: Role, rng: StdRng) -> Self {
        let n = game.actions().len();
        let uniform = vec![1.0 / n as f64; n];
        Self {
            game,
            role,
            policy: uniform.clone(),
            average_policy: uniform,
            values: vec![0.0; n],
            t: 0,
            rng,
        }
    }

    /// Create an agent whose random source is seeded with `seed`
    pub fn with_seed(game: Arc<Game>, role: Role, seed: u64) -> Self {
        Self::new(game, role, StdRng::seed_from_u64(seed))
    }

    pub fn policy(&self) -> &[f64] {
        &self.policy
    }

    pub fn average_policy(&self) -> &[f64] {
        &self.average_policy
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn updates(&self) -> u64 {
        self.t
    }

    /// Whether the current policy beats the average policy under `values`
    pub fn is_winning(&self) -> bool {
        expectation(&self.policy, &self.values) > expectation(&self.average_policy, &self.values)
    }
}

impl Agent for WolfPhcAgent {
    fn choose_action(&mut self) -> ActionId {
        let weighted: Vec<(ActionId, f64)> = self
            .game
            .actions()
            .ids()
            .zip(self.policy.iter().copied())
            .collect();
        weighted_sample(&mut self.rng, &weighted).unwrap_or_else(|| ActionId::new(0))
    }

    fn observe_outcome(&mut self, outcome: &Outcome) {
        self.t += 1;
        let reward = self
            .game
            .payoff(self.role, outcome.own_action, outcome.opponent_action);

        let a = outcome.own_action.index();
        let next_value = expectation(&self.policy, &self.values);
        let current = self.values[a];
        self.values[a] = current + VALUE_LEARNING_RATE * (reward + DISCOUNT * next_value - current);

        let alpha = if self.is_winning() {
            ALPHA_WIN
        } else {
            ALPHA_LOSE
        };

        let greedy = argmax_all(self.values.iter().copied().enumerate());
        for (index, p) in self.policy.iter_mut().enumerate() {
            if greedy.contains(&index) {
                *p += alpha * (1.0 - *p);
            } else {
                *p -= alpha * *p;
            }
        }
        if let Some(normalized) = normalize_weights(self.policy.iter().copied()) {
            self.policy = normalized;
        }

        let t = self.t as f64;
        for (average, &p) in self.average_policy.iter_mut().zip(&self.policy) {
            *average = (t - 1.0) / t * *average + 1.0 / t * p;
        }
    }

    fn name(&self) -> &str {
        "WoLF-PHC"
    }

    fn role(&self) -> Role {
        self.role
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn action_weights(&self) -> Option<Vec<(ActionId, f64)>> {
        Some(
            self.game
                .actions()
                .ids()
                .zip(self.policy.iter().copied())
                .collect(),
        )
    }
}
