//! Common test utilities for the repeated-games test suite.
//!
//! Scripted agents and random outcome generators shared by the integration
//! tests.

#![allow(dead_code)]

use rand::{Rng, rngs::StdRng};
use repeated_games::{
    ActionId, Game, Role,
    ports::{Agent, Outcome},
};

/// Plays a fixed action forever.
pub struct FixedAgent {
    pub action: ActionId,
    pub role: Role,
}

impl FixedAgent {
    pub fn new(action: usize, role: Role) -> Self {
        Self {
            action: ActionId::new(action),
            role,
        }
    }
}

impl Agent for FixedAgent {
    fn choose_action(&mut self) -> ActionId {
        self.action
    }

    fn observe_outcome(&mut self, _outcome: &Outcome) {}

    fn name(&self) -> &str {
        "Fixed"
    }

    fn role(&self) -> Role {
        self.role
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Outcome of the joint action `(own, opponent)` seen from `role`.
pub fn outcome_for(game: &Game, role: Role, own: ActionId, opponent: ActionId) -> Outcome {
    Outcome {
        own_action: own,
        opponent_action: opponent,
        own_payoff: game.payoff(role, own, opponent),
        opponent_payoff: game.opponent_payoff(role, own, opponent),
    }
}

/// A uniformly random joint action of `game`, seen from `role`.
pub fn random_outcome(game: &Game, role: Role, rng: &mut StdRng) -> Outcome {
    let n = game.actions().len();
    let own = ActionId::new(rng.random_range(0..n));
    let opponent = ActionId::new(rng.random_range(0..n));
    outcome_for(game, role, own, opponent)
}
