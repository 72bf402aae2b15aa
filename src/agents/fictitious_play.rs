//! Fictitious play
//!
//! Best-responds to the empirical frequency of the opponent's past actions.

use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    game::{ActionId, Game, Role},
    ports::{Agent, Outcome},
    utils::choose_best,
};

/// One-step-lookahead fictitious play agent
#[derive(Debug, Clone)]
pub struct FictitiousPlayAgent {
    game: Arc<Game>,
    role: Role,
    /// Observed `(own action, opponent action)` pairs
    history: Vec<(ActionId, ActionId)>,
    /// Opponent action counts, kept in step with `history`
    opponent_counts: Vec<usize>,
    rng: StdRng,
}

impl FictitiousPlayAgent {
    /// Create a fictitious play agent with an explicit random source
    pub fn new(game: Arc<Game>, role: Role, rng: StdRng) -> Self {
        let n = game.actions().len();
        Self {
            game,
            role,
            history: Vec::new(),
            opponent_counts: vec![0; n],
            rng,
        }
    }

    /// Create an agent whose random source is seeded with `seed`
    pub fn with_seed(game: Arc<Game>, role: Role, seed: u64) -> Self {
        Self::new(game, role, StdRng::seed_from_u64(seed))
    }

    /// Joint actions observed so far
    pub fn history(&self) -> &[(ActionId, ActionId)] {
        &self.history
    }

    /// Empirical opponent action distribution, `None` before the first round
    pub fn opponent_distribution(&self) -> Option<Vec<f64>> {
        let total = self.history.len();
        if total == 0 {
            return None;
        }
        Some(
            self.opponent_counts
                .iter()
                .map(|&count| count as f64 / total as f64)
                .collect(),
        )
    }

    /// Expected own payoff of every action against the empirical distribution
    pub fn expected_payoffs(&self) -> Option<Vec<(ActionId, f64)>> {
        let distribution = self.opponent_distribution()?;
        let actions = self.game.actions();
        Some(
            actions
                .ids()
                .map(|own| {
                    let expected = actions
                        .ids()
                        .zip(&distribution)
                        .map(|(opponent, &p)| p * self.game.payoff(self.role, own, opponent))
                        .sum::<f64>();
                    (own, expected)
                })
                .collect(),
        )
    }
}

impl Agent for FictitiousPlayAgent {
    fn choose_action(&mut self) -> ActionId {
        match self.expected_payoffs() {
            None => ActionId::new(self.rng.random_range(0..self.game.actions().len())),
            Some(expected) => choose_best(&mut self.rng, expected)
                .unwrap_or_else(|| ActionId::new(0)),
        }
    }

    fn observe_outcome(&mut self, outcome: &Outcome) {
        self.history
            .push((outcome.own_action, outcome.opponent_action));
        self.opponent_counts[outcome.opponent_action.index()] += 1;
    }

    fn name(&self) -> &str {
        "FP"
    }

    fn role(&self) -> Role {
        self.role
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
