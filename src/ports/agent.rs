//! Agent port - abstraction over the learning rules playing a repeated game
//!
//! This port defines the contract every learning rule implements, allowing
//! the simulation harness to drive:
//! - Fictitious play (empirical best response)
//! - SPaM (guilt-driven teaching and following)
//! - WoLF-PHC (win-or-learn-fast policy hill climbing)

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::game::{ActionId, Game, Role};

/// Realized result of one round, seen from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Action this player actually executed
    pub own_action: ActionId,
    /// Action the opponent actually executed
    pub opponent_action: ActionId,
    /// Payoff this player received
    pub own_payoff: f64,
    /// Payoff the opponent received
    pub opponent_payoff: f64,
}

impl Outcome {
    /// The same round seen from the other seat
    pub fn mirrored(self) -> Outcome {
        Outcome {
            own_action: self.opponent_action,
            opponent_action: self.own_action,
            own_payoff: self.opponent_payoff,
            opponent_payoff: self.own_payoff,
        }
    }
}

/// Agent trait - Unified interface for all learning rules
///
/// Agents are created fresh for every trial and own their random source, so
/// two agents never share hidden state.
///
/// # Examples
///
/// ```no_run
/// use repeated_games::ports::{Agent, Outcome};
///
/// fn play_round(row: &mut dyn Agent, column: &mut dyn Agent) {
///     let a = row.choose_action();
///     let b = column.choose_action();
///     // ... resolve payoffs, then feed the outcome back
/// #   let _ = (a, b);
/// }
/// ```
pub trait Agent: Send {
    /// Choose the action this agent intends to play next.
    fn choose_action(&mut self) -> ActionId;

    /// Update internal state after the joint outcome of a round is known.
    ///
    /// Actions in `outcome` are the executed ones, which may differ from the
    /// intended ones under execution noise.
    fn observe_outcome(&mut self, outcome: &Outcome);

    /// Get the agent's display name.
    fn name(&self) -> &str;

    /// Side of the matrix this agent plays.
    fn role(&self) -> Role;

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Current mixed strategy, if the rule maintains an explicit one.
    ///
    /// # Default Implementation
    ///
    /// Returns `None`.
    fn action_weights(&self) -> Option<Vec<(ActionId, f64)>> {
        None
    }
}

/// Builds fresh agents for each trial.
///
/// Implemented by [`crate::agents::AgentKind`] and by any closure
/// `Fn(&Arc<Game>, Role, u64) -> Box<dyn Agent>`.
pub trait AgentFactory: Sync {
    /// Build an agent for `role`, seeding its random source with `seed`.
    fn build(&self, game: &Arc<Game>, role: Role, seed: u64) -> Box<dyn Agent>;
}

impl<F> AgentFactory for F
where
    F: Fn(&Arc<Game>, Role, u64) -> Box<dyn Agent> + Sync,
{
    fn build(&self, game: &Arc<Game>, role: Role, seed: u64) -> Box<dyn Agent> {
        self(game, role, seed)
    }
}
