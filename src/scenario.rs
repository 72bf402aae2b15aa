//! Learner comparisons across built-in games
//!
//! A scenario pits every learner against every opponent on one game. Symmetric
//! games seat the learner as the row player; games whose roles differ run
//! each comparison twice, once with the learner on each side.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agents::AgentKind,
    analysis::Curve,
    app::ExperimentConfig,
    game::{Game, Role, chicken, prisoners_dilemma, tricky},
    pipeline::{ExperimentPipeline, ProgressObserver},
    ports::AgentFactory,
};

/// Curve of a learner's average payoff against `opponent`.
///
/// A row learner is seated as agent 1 and its player-1 curve is returned; a
/// column learner is seated as agent 2 with the opponent as agent 1, and its
/// player-2 curve is returned.
pub fn measure_learner(
    learner: &dyn AgentFactory,
    opponent: &dyn AgentFactory,
    game: &Arc<Game>,
    learner_role: Role,
    config: &ExperimentConfig,
) -> Result<Curve> {
    let mut pipeline = ExperimentPipeline::new(config.clone());
    measure_with(&mut pipeline, learner, opponent, game, learner_role)
}

fn measure_with(
    pipeline: &mut ExperimentPipeline<'_>,
    learner: &dyn AgentFactory,
    opponent: &dyn AgentFactory,
    game: &Arc<Game>,
    learner_role: Role,
) -> Result<Curve> {
    Ok(match learner_role {
        Role::Row => pipeline.run(learner, opponent, game)?.player1,
        Role::Column => pipeline.run(opponent, learner, game)?.player2,
    })
}

/// One game under comparison
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: String,
    pub game: Arc<Game>,
    /// Measure learners on both sides of the matrix
    pub split_roles: bool,
}

impl Scenario {
    pub fn new(title: impl Into<String>, game: Game, split_roles: bool) -> Self {
        Self {
            title: title.into(),
            game: Arc::new(game),
            split_roles,
        }
    }

    /// Prisoner's dilemma, chicken and the tricky game, in that order
    pub fn builtin() -> Result<Vec<Scenario>> {
        Ok(vec![
            Scenario::new("Prisoner's Dilemma", prisoners_dilemma()?, false),
            Scenario::new("Chicken", chicken()?, false),
            Scenario::new("Tricky Game", tricky()?, true),
        ])
    }

    /// Learner seats measured in this scenario
    pub fn roles(&self) -> &'static [Role] {
        if self.split_roles {
            &[Role::Row, Role::Column]
        } else {
            &[Role::Row]
        }
    }
}

/// Every learner's curve against a single opponent, from one seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub title: String,
    pub role: Role,
    pub opponent: AgentKind,
    pub curves: Vec<(AgentKind, Curve)>,
}

impl Comparison {
    /// Learner with the highest final mean payoff
    pub fn best_learner(&self) -> Option<(AgentKind, f64)> {
        self.curves
            .iter()
            .filter_map(|(kind, curve)| Some((*kind, curve.last()?.0)))
            .fold(None, |best, (kind, payoff)| match best {
                Some((_, top)) if top >= payoff => best,
                _ => Some((kind, payoff)),
            })
    }
}

/// Runs the learner-versus-opponent grid of a scenario
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ExperimentConfig,
    learners: Vec<AgentKind>,
    opponents: Vec<AgentKind>,
    show_progress: bool,
}

impl ScenarioRunner {
    /// Create a runner comparing every learning rule against every other
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            learners: AgentKind::ALL.to_vec(),
            opponents: AgentKind::ALL.to_vec(),
            show_progress: false,
        }
    }

    pub fn with_learners(mut self, learners: Vec<AgentKind>) -> Self {
        self.learners = learners;
        self
    }

    pub fn with_opponents(mut self, opponents: Vec<AgentKind>) -> Self {
        self.opponents = opponents;
        self
    }

    /// Show a progress bar for every experiment
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run every comparison of `scenario`.
    ///
    /// Experiment `k` (counting learners fastest, then seats, then opponents)
    /// uses seed `config.seed + k`.
    pub fn run(&self, scenario: &Scenario) -> Result<Vec<Comparison>> {
        log::info!("{:<32}{}", "starting scenario", scenario.title);
        let mut comparisons = Vec::new();
        let mut seed_offset: u64 = 0;

        for &opponent in &self.opponents {
            for &role in scenario.roles() {
                let mut curves = Vec::with_capacity(self.learners.len());
                for &learner in &self.learners {
                    let config = self
                        .config
                        .clone()
                        .with_seed(self.config.seed.wrapping_add(seed_offset));
                    seed_offset += 1;

                    let mut pipeline = ExperimentPipeline::new(config);
                    if self.show_progress {
                        pipeline = pipeline.with_observer(Box::new(ProgressObserver::with_label(
                            format!("{learner} ({role}) vs {opponent}"),
                        )));
                    }
                    let curve =
                        measure_with(&mut pipeline, &learner, &opponent, &scenario.game, role)?;
                    curves.push((learner, curve));
                }

                let title = if scenario.split_roles {
                    format!("{}: learners ({}) vs {}", scenario.title, role, opponent)
                } else {
                    format!("{}: learners vs {}", scenario.title, opponent)
                };
                comparisons.push(Comparison {
                    title,
                    role,
                    opponent,
                    curves,
                });
            }
        }

        log::info!(
            "{:<32}{} ({} comparisons)",
            "finished scenario",
            scenario.title,
            comparisons.len()
        );
        Ok(comparisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_repeated;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig::default()
            .with_total_steps(30)
            .with_num_repeats(2)
            .with_seed(99)
    }

    #[test]
    fn test_column_learner_gets_player_two_curve() {
        let game = Arc::new(tricky().unwrap());
        let config = small_config();
        let curve = measure_learner(
            &AgentKind::Fp,
            &AgentKind::WolfPhc,
            &game,
            Role::Column,
            &config,
        )
        .unwrap();

        let direct = run_repeated(
            &AgentKind::WolfPhc,
            &AgentKind::Fp,
            &game,
            config.num_repeats,
            config.total_steps,
            config.noise,
            config.seed,
        )
        .unwrap();
        assert_eq!(curve, direct.player2);
    }

    #[test]
    fn test_split_scenario_produces_both_seats() {
        let scenario = Scenario::new("Tricky Game", tricky().unwrap(), true);
        let runner = ScenarioRunner::new(small_config())
            .with_learners(vec![AgentKind::Fp, AgentKind::Spam])
            .with_opponents(vec![AgentKind::WolfPhc]);
        let comparisons = runner.run(&scenario).unwrap();

        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].role, Role::Row);
        assert_eq!(comparisons[1].role, Role::Column);
        assert_eq!(comparisons[1].curves[1].0, AgentKind::Spam);

        // Fourth experiment (column seat, second learner) uses seed + 3
        let expected = measure_learner(
            &AgentKind::Spam,
            &AgentKind::WolfPhc,
            &scenario.game,
            Role::Column,
            &small_config().with_seed(102),
        )
        .unwrap();
        assert_eq!(comparisons[1].curves[1].1, expected);
    }

    #[test]
    fn test_builtin_scenarios() {
        let scenarios = Scenario::builtin().unwrap();
        let split: Vec<bool> = scenarios.iter().map(|s| s.split_roles).collect();
        assert_eq!(split, vec![false, false, true]);
        assert_eq!(scenarios[2].roles(), &[Role::Row, Role::Column]);
    }
}
