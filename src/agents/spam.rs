//! SPaM: guilt-driven teaching and following
//!
//! The agent anchors on a target joint action that maximizes the product of
//! both players' advantages over their security values. A teacher utility
//! `T` marks actions that credibly pull the opponent toward the target, a
//! follower utility `F` estimates the realized payoff of each action, and
//! guilt bookkeeping decides who owes whom after a deviation.

use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::guilt::{GuiltCase, GuiltStep};
use crate::{
    game::{ActionId, Game, Role},
    ports::{Agent, Outcome},
    utils::choose_best,
};

/// Probability mass not spent following within the teaching set
pub const ETA: f64 = 0.1;
/// Share of `ETA` spent on the globally best follower action
pub const RHO: f64 = 0.8;

/// One round as remembered by a SPaM agent, tagged with post-update guilt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub own_action: ActionId,
    pub opponent_action: ActionId,
    pub own_payoff: f64,
    pub opponent_payoff: f64,
    pub own_guilt: f64,
    pub opponent_guilt: f64,
}

/// Running per-action aggregates over the round history
#[derive(Debug, Clone, Copy, Default)]
struct ActionStats {
    plays: usize,
    own_payoff_sum: f64,
    plays_while_opponent_guilty: usize,
    opponent_payoff_sum_while_guilty: f64,
}

/// Joint action `(row, column)` maximizing the product of both players'
/// positive advantages over their security values.
///
/// Joint actions are scanned rows-outermost in sorted label order and only a
/// strictly larger product replaces the incumbent, so the first joint action
/// wins when every product is zero.
pub fn target_joint_action(game: &Game) -> (ActionId, ActionId) {
    let m_row = game.security_value(Role::Row);
    let m_column = game.security_value(Role::Column);
    let actions = game.actions();

    let mut best: Option<((ActionId, ActionId), f64)> = None;
    for (row, column, (r, c)) in game.matrix().entries() {
        let (Some(row), Some(column)) = (actions.id_of(row), actions.id_of(column)) else {
            continue;
        };
        let product = (r - m_row).max(0.0) * (c - m_column).max(0.0);
        if best.is_none_or(|(_, incumbent)| product > incumbent) {
            best = Some(((row, column), product));
        }
    }

    best.map(|(joint, _)| joint)
        .unwrap_or((ActionId::new(0), ActionId::new(0)))
}

/// Guilt-based teacher/follower agent
#[derive(Debug, Clone)]
pub struct SpamAgent {
    game: Arc<Game>,
    role: Role,
    /// Target joint action as `(row, column)`
    target: (ActionId, ActionId),
    own_guilt: f64,
    opponent_guilt: f64,
    /// Teacher utility per action
    teacher: Vec<f64>,
    /// Follower utility per action
    follower: Vec<f64>,
    history: Vec<RoundRecord>,
    stats: Vec<ActionStats>,
    last_cases: Option<(GuiltCase, GuiltCase)>,
    rng: StdRng,
}

impl SpamAgent {
    /// Create a SPaM agent with an explicit random source
    pub fn new(game: Arc<Game>, role: Role, rng: StdRng) -> Self {
        let n = game.actions().len();
        let target = target_joint_action(&game);
        Self {
            game,
            role,
            target,
            own_guilt: 0.0,
            opponent_guilt: 0.0,
            teacher: vec![0.0; n],
            follower: vec![0.0; n],
            history: Vec::new(),
            stats: vec![ActionStats::default(); n],
            last_cases: None,
            rng,
        }
    }

    /// Create an agent whose random source is seeded with `seed`
    pub fn with_seed(game: Arc<Game>, role: Role, seed: u64) -> Self {
        Self::new(game, role, StdRng::seed_from_u64(seed))
    }

    /// Target joint action as `(row, column)`
    pub fn target(&self) -> (ActionId, ActionId) {
        self.target
    }

    /// This agent's component of the target
    pub fn own_target(&self) -> ActionId {
        match self.role {
            Role::Row => self.target.0,
            Role::Column => self.target.1,
        }
    }

    /// The opponent's component of the target
    pub fn opponent_target(&self) -> ActionId {
        match self.role {
            Role::Row => self.target.1,
            Role::Column => self.target.0,
        }
    }

    pub fn own_guilt(&self) -> f64 {
        self.own_guilt
    }

    pub fn opponent_guilt(&self) -> f64 {
        self.opponent_guilt
    }

    pub fn teacher_utilities(&self) -> &[f64] {
        &self.teacher
    }

    pub fn follower_utilities(&self) -> &[f64] {
        &self.follower
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Guilt transitions `(own, opponent)` taken in the last round
    pub fn last_guilt_cases(&self) -> Option<(GuiltCase, GuiltCase)> {
        self.last_cases
    }

    fn target_payoffs(&self) -> (f64, f64) {
        let (row, column) = self.target;
        let (r, c) = self.game.payoffs(row, column);
        match self.role {
            Role::Row => (r, c),
            Role::Column => (c, r),
        }
    }

    /// Own guilt moves first against the opponent's previous guilt; the
    /// opponent's guilt then sees the freshly updated own guilt.
    fn update_guilt(&mut self, outcome: &Outcome) {
        let (own_target_payoff, opponent_target_payoff) = self.target_payoffs();
        let own_on_target = outcome.own_action == self.own_target();
        let opponent_on_target = outcome.opponent_action == self.opponent_target();

        let (own_case, own_guilt) = GuiltStep {
            guilt: self.own_guilt,
            partner_guilt: self.opponent_guilt,
            on_target: own_on_target,
            partner_on_target: opponent_on_target,
            payoff: outcome.own_payoff,
            target_payoff: own_target_payoff,
        }
        .apply();
        self.own_guilt = own_guilt;

        let (opponent_case, opponent_guilt) = GuiltStep {
            guilt: self.opponent_guilt,
            partner_guilt: self.own_guilt,
            on_target: opponent_on_target,
            partner_on_target: own_on_target,
            payoff: outcome.opponent_payoff,
            target_payoff: opponent_target_payoff,
        }
        .apply();
        self.opponent_guilt = opponent_guilt;

        self.last_cases = Some((own_case, opponent_case));
    }

    fn update_utilities(&mut self) {
        for (follower, stats) in self.follower.iter_mut().zip(&self.stats) {
            *follower = if stats.plays == 0 {
                0.0
            } else {
                stats.own_payoff_sum / stats.plays as f64
            };
        }

        let own_target = self.own_target();
        if self.opponent_guilt <= 0.0 {
            for (index, teacher) in self.teacher.iter_mut().enumerate() {
                *teacher = if index == own_target.index() { 1.0 } else { -1.0 };
            }
            return;
        }

        let (_, opponent_target_payoff) = self.target_payoffs();
        let opponent_security = self.game.security_value(self.role.opponent());
        let expected_penalty = self
            .opponent_guilt
            .min((opponent_target_payoff - opponent_security).max(0.0));

        for (teacher, stats) in self.teacher.iter_mut().zip(&self.stats) {
            let opponent_expected = if stats.plays_while_opponent_guilty == 0 {
                0.0
            } else {
                stats.opponent_payoff_sum_while_guilty / stats.plays_while_opponent_guilty as f64
            };
            *teacher = opponent_target_payoff - opponent_expected - expected_penalty;
        }
    }
}

impl Agent for SpamAgent {
    fn choose_action(&mut self) -> ActionId {
        let actions = self.game.actions();
        let max_teacher = self.teacher.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let teaching: Vec<ActionId> = actions
            .ids()
            .filter(|a| {
                let t = self.teacher[a.index()];
                t >= 0.0 || t == max_teacher
            })
            .collect();

        let u: f64 = self.rng.random();
        let pick = if u < 1.0 - ETA {
            choose_best(
                &mut self.rng,
                teaching.iter().map(|&a| (a, self.follower[a.index()])),
            )
        } else if u < (1.0 - ETA) + RHO * ETA {
            choose_best(
                &mut self.rng,
                actions.ids().map(|a| (a, self.follower[a.index()])),
            )
        } else {
            Some(ActionId::new(self.rng.random_range(0..actions.len())))
        };
        pick.unwrap_or_else(|| self.own_target())
    }

    fn observe_outcome(&mut self, outcome: &Outcome) {
        self.update_guilt(outcome);

        self.history.push(RoundRecord {
            own_action: outcome.own_action,
            opponent_action: outcome.opponent_action,
            own_payoff: outcome.own_payoff,
            opponent_payoff: outcome.opponent_payoff,
            own_guilt: self.own_guilt,
            opponent_guilt: self.opponent_guilt,
        });

        let stats = &mut self.stats[outcome.own_action.index()];
        stats.plays += 1;
        stats.own_payoff_sum += outcome.own_payoff;
        if self.opponent_guilt > 0.0 {
            stats.plays_while_opponent_guilty += 1;
            stats.opponent_payoff_sum_while_guilty += outcome.opponent_payoff;
        }

        self.update_utilities();
    }

    fn name(&self) -> &str {
        "SPaM"
    }

    fn role(&self) -> Role {
        self.role
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{chicken, prisoners_dilemma, tricky};

    fn round(game: &Game, row: usize, column: usize, role: Role) -> Outcome {
        let (row, column) = (ActionId::new(row), ActionId::new(column));
        let (r, c) = game.payoffs(row, column);
        match role {
            Role::Row => Outcome {
                own_action: row,
                opponent_action: column,
                own_payoff: r,
                opponent_payoff: c,
            },
            Role::Column => Outcome {
                own_action: column,
                opponent_action: row,
                own_payoff: c,
                opponent_payoff: r,
            },
        }
    }

    #[test]
    fn test_targets_of_builtin_games() {
        let c = ActionId::new(0);
        let d = ActionId::new(1);
        assert_eq!(target_joint_action(&prisoners_dilemma().unwrap()), (c, c));
        assert_eq!(target_joint_action(&chicken().unwrap()), (c, c));
        // Row a, column b in the tricky game
        assert_eq!(target_joint_action(&tricky().unwrap()), (c, d));
    }

    #[test]
    fn test_initial_choice_is_uniform() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut counts = [0usize; 2];
        for seed in 0..2_000 {
            let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, seed);
            counts[agent.choose_action().index()] += 1;
        }
        assert!(counts[0] > 850 && counts[1] > 850, "{counts:?}");
    }

    #[test]
    fn test_opponent_defection_makes_opponent_guilty() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 1);

        agent.observe_outcome(&round(&game, 0, 1, Role::Row));
        assert_eq!(agent.own_guilt(), 0.0);
        // Opponent got 5 against a target payoff of 3
        assert!((agent.opponent_guilt() - (2.0 + 1e-3)).abs() < 1e-12);
        assert_eq!(
            agent.last_guilt_cases(),
            Some((GuiltCase::Innocent, GuiltCase::Offended))
        );

        // Opponent guilty: T = r_opp(c) - E[U_opp | guilty] - E_p
        // E_p = min(2.001, 3 - 1) = 2; E_U_opp(C) = 5, E_U_opp(D) = 0
        let t = agent.teacher_utilities();
        assert!((t[0] - (3.0 - 5.0 - 2.0)).abs() < 1e-12);
        assert!((t[1] - (3.0 - 0.0 - 2.0)).abs() < 1e-12);
        assert_eq!(agent.follower_utilities(), &[0.0, 0.0]);
    }

    #[test]
    fn test_teacher_utility_points_at_target_when_opponent_innocent() {
        let game = Arc::new(tricky().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Column, 4);
        agent.observe_outcome(&round(&game, 0, 1, Role::Column));
        assert_eq!(agent.teacher_utilities(), &[-1.0, 1.0]);
        assert_eq!(agent.follower_utilities(), &[0.0, 2.0]);
    }

    #[test]
    fn test_opponent_excused_by_fresh_own_guilt() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 3);
        // Both defect from mutual innocence
        agent.observe_outcome(&round(&game, 1, 1, Role::Row));
        assert_eq!(
            agent.last_guilt_cases(),
            Some((GuiltCase::Offended, GuiltCase::Excused))
        );
        assert!(agent.own_guilt() > 0.0);
        assert_eq!(agent.opponent_guilt(), 0.0);
    }

    #[test]
    fn test_history_records_post_update_guilt() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 2);
        agent.observe_outcome(&round(&game, 1, 0, Role::Row));
        let record = agent.history()[0];
        assert_eq!(record.own_guilt, agent.own_guilt());
        assert!(record.own_guilt > 0.0);
        assert_eq!(record.opponent_guilt, 0.0);
    }

    #[test]
    fn test_follows_best_teaching_action_mostly() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 8);
        for _ in 0..20 {
            agent.observe_outcome(&round(&game, 0, 0, Role::Row));
        }
        // T = (+1, -1) and F(C) = 3 is the only candidate
        let picks = (0..2_000)
            .filter(|_| agent.choose_action() == ActionId::new(0))
            .count();
        // C is chosen with probability 0.9 + 0.08 + 0.01
        let rate = picks as f64 / 2_000.0;
        assert!((rate - 0.99).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn test_follows_within_teaching_set_not_global_best() {
        let game = Arc::new(prisoners_dilemma().unwrap());
        let mut agent = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 12);
        agent.observe_outcome(&round(&game, 1, 0, Role::Row));
        for _ in 0..5 {
            agent.observe_outcome(&round(&game, 0, 0, Role::Row));
        }
        assert_eq!(agent.teacher_utilities(), &[1.0, -1.0]);
        assert_eq!(agent.follower_utilities(), &[3.0, 5.0]);

        // D has the best F but lies outside the teaching set
        let picks = (0..4_000)
            .filter(|_| agent.choose_action() == ActionId::new(0))
            .count();
        // C is chosen with probability 0.9 + 0.01
        let rate = picks as f64 / 4_000.0;
        assert!((rate - 0.91).abs() < 0.025, "rate {rate}");
    }
}
