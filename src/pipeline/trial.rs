//! A single trial: two agents playing one repeated game

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{ActionId, Game, NoiseModel, Role},
    ports::{Agent, Outcome},
};

/// Everything that happened in one round of a trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Round number, starting at 1
    pub step: usize,
    /// Intended `(row, column)` actions
    pub intended: (ActionId, ActionId),
    /// Executed `(row, column)` actions after noise
    pub executed: (ActionId, ActionId),
    /// Realized `(row, column)` payoffs
    pub payoffs: (f64, f64),
}

impl StepRecord {
    /// Number of players whose intended action was replaced (0, 1 or 2)
    pub fn perturbations(&self) -> usize {
        usize::from(self.intended.0 != self.executed.0)
            + usize::from(self.intended.1 != self.executed.1)
    }
}

/// Running average payoffs of both seats.
///
/// Entry `k` is the mean payoff over the first `k + 1` rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Row player (agent 1)
    pub player1: Vec<f64>,
    /// Column player (agent 2)
    pub player2: Vec<f64>,
}

impl TrialResult {
    /// Rounds played
    pub fn len(&self) -> usize {
        self.player1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player1.is_empty()
    }

    /// Average payoffs `(player1, player2)` over the whole trial
    pub fn final_averages(&self) -> Option<(f64, f64)> {
        Some((*self.player1.last()?, *self.player2.last()?))
    }
}

fn check_role(agent: &dyn Agent, expected: Role) -> Result<()> {
    if agent.role() != expected {
        return Err(Error::RoleMismatch {
            agent: agent.name().to_string(),
            expected: expected.to_string(),
            actual: agent.role().to_string(),
        });
    }
    Ok(())
}

/// Play `total_steps` rounds of `game` between `agent1` (row) and `agent2`
/// (column).
///
/// Each round both agents choose, `noise` perturbs both choices (agent 1
/// first) using `rng`, payoffs are resolved from the executed joint action and
/// both agents observe it, agent 1 first.
///
/// # Errors
///
/// Returns [`Error::RoleMismatch`] unless agent 1 plays row and agent 2 plays
/// column.
pub fn run_trial<R: Rng + ?Sized>(
    agent1: &mut dyn Agent,
    agent2: &mut dyn Agent,
    game: &Game,
    total_steps: usize,
    noise: &NoiseModel,
    rng: &mut R,
) -> Result<TrialResult> {
    run_trial_with(agent1, agent2, game, total_steps, noise, rng, |_| Ok(()))
}

/// Like [`run_trial`], calling `on_step` after every round.
pub fn run_trial_with<R, F>(
    agent1: &mut dyn Agent,
    agent2: &mut dyn Agent,
    game: &Game,
    total_steps: usize,
    noise: &NoiseModel,
    rng: &mut R,
    mut on_step: F,
) -> Result<TrialResult>
where
    R: Rng + ?Sized,
    F: FnMut(&StepRecord) -> Result<()>,
{
    check_role(agent1, Role::Row)?;
    check_role(agent2, Role::Column)?;

    let actions = game.actions();
    let mut totals = (0.0, 0.0);
    let mut result = TrialResult {
        player1: Vec::with_capacity(total_steps),
        player2: Vec::with_capacity(total_steps),
    };

    for step in 1..=total_steps {
        let intended = (agent1.choose_action(), agent2.choose_action());
        let executed = (
            noise.execute(intended.0, actions, rng),
            noise.execute(intended.1, actions, rng),
        );
        let payoffs = game.payoffs(executed.0, executed.1);

        totals.0 += payoffs.0;
        totals.1 += payoffs.1;
        result.player1.push(totals.0 / step as f64);
        result.player2.push(totals.1 / step as f64);

        on_step(&StepRecord {
            step,
            intended,
            executed,
            payoffs,
        })?;

        let outcome = Outcome {
            own_action: executed.0,
            opponent_action: executed.1,
            own_payoff: payoffs.0,
            opponent_payoff: payoffs.1,
        };
        agent1.observe_outcome(&outcome);
        agent2.observe_outcome(&outcome.mirrored());
    }

    Ok(result)
}
