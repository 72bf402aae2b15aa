//! Tests for the simulation harness and experiment pipeline

mod common;

use std::sync::Arc;

use common::FixedAgent;
use rand::{SeedableRng, rngs::StdRng};
use repeated_games::{
    AgentKind, Error, ExperimentConfig, Game, NoiseModel, Result, Role,
    game::{prisoners_dilemma, tricky},
    pipeline::{
        ExperimentPipeline, MetricsObserver, StepRecord, TrialResult, run_repeated, run_trial,
    },
    ports::{Agent, AgentFactory, Observer},
};

fn pd() -> Arc<Game> {
    Arc::new(prisoners_dilemma().unwrap())
}

/// Records the order of lifecycle events
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    steps: usize,
}

impl Observer for EventLog {
    fn on_experiment_start(&mut self, num_trials: usize, total_steps: usize) -> Result<()> {
        self.events.push(format!("start {num_trials}x{total_steps}"));
        Ok(())
    }

    fn on_trial_start(&mut self, trial: usize) -> Result<()> {
        self.events.push(format!("trial {trial}"));
        Ok(())
    }

    fn on_step(&mut self, _trial: usize, _record: &StepRecord) -> Result<()> {
        self.steps += 1;
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, _result: &TrialResult) -> Result<()> {
        self.events.push(format!("end {trial}"));
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        self.events.push("done".to_string());
        Ok(())
    }
}

#[test]
fn test_trial_produces_one_average_per_step() {
    let game = pd();
    let mut row = AgentKind::Spam.build(&game, Role::Row, 1);
    let mut column = AgentKind::WolfPhc.build(&game, Role::Column, 2);
    let mut rng = StdRng::seed_from_u64(3);

    let result = run_trial(
        row.as_mut(),
        column.as_mut(),
        &game,
        120,
        &NoiseModel::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(result.player1.len(), 120);
    assert_eq!(result.player2.len(), 120);
    // Running averages stay within the payoff range
    assert!(result.player1.iter().all(|p| (0.0..=5.0).contains(p)));
}

#[test]
fn test_running_average_matches_payoff_sequence() {
    // Tricky game, row fixed on "b", column fixed on "a": (1, 0) every round
    let game = Arc::new(tricky().unwrap());
    let mut row = FixedAgent::new(1, Role::Row);
    let mut column = FixedAgent::new(0, Role::Column);
    let mut rng = StdRng::seed_from_u64(0);
    let result =
        run_trial(&mut row, &mut column, &game, 10, &NoiseModel::none(), &mut rng).unwrap();
    assert_eq!(result.player1, vec![1.0; 10]);
    assert_eq!(result.player2, vec![0.0; 10]);
}

#[test]
fn test_swapped_roles_are_rejected() {
    let game = pd();
    let mut row = FixedAgent::new(0, Role::Row);
    let mut column = FixedAgent::new(0, Role::Column);
    let mut rng = StdRng::seed_from_u64(0);
    let result = run_trial(&mut column, &mut row, &game, 5, &NoiseModel::none(), &mut rng);
    assert!(matches!(result, Err(Error::RoleMismatch { .. })));
}

#[test]
fn test_repeated_fp_vs_fp_is_reproducible() {
    let game = pd();
    let first = run_repeated(&AgentKind::Fp, &AgentKind::Fp, &game, 10, 500, 0.05, 12345).unwrap();
    let second = run_repeated(&AgentKind::Fp, &AgentKind::Fp, &game, 10, 500, 0.05, 12345).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.player1.len(), 500);

    let other = run_repeated(&AgentKind::Fp, &AgentKind::Fp, &game, 10, 500, 0.05, 54321).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_parallel_matches_sequential() {
    let game = pd();
    let config = ExperimentConfig::default()
        .with_total_steps(500)
        .with_num_repeats(10)
        .with_noise(0.05)
        .with_seed(12345);

    let sequential = ExperimentPipeline::new(config.clone())
        .run(&AgentKind::Fp, &AgentKind::Fp, &game)
        .unwrap();
    let parallel = ExperimentPipeline::new(config.with_parallel(true))
        .run(&AgentKind::Fp, &AgentKind::Fp, &game)
        .unwrap();
    assert_eq!(sequential, parallel);

    // Mixed rules too
    let config = ExperimentConfig::default().with_total_steps(100).with_num_repeats(4);
    let sequential = ExperimentPipeline::new(config.clone())
        .run(&AgentKind::Spam, &AgentKind::WolfPhc, &game)
        .unwrap();
    let parallel = ExperimentPipeline::new(config.with_parallel(true))
        .run(&AgentKind::Spam, &AgentKind::WolfPhc, &game)
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_run_repeated_rejects_bad_arguments() {
    let game = pd();
    assert!(matches!(
        run_repeated(&AgentKind::Fp, &AgentKind::Fp, &game, 0, 10, 0.05, 1),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        run_repeated(&AgentKind::Fp, &AgentKind::Fp, &game, 2, 10, 1.5, 1),
        Err(Error::InvalidNoise { .. })
    ));
}

#[test]
fn test_single_repeat_has_zero_std() {
    let game = pd();
    let result = run_repeated(&AgentKind::Spam, &AgentKind::Fp, &game, 1, 50, 0.05, 8).unwrap();
    assert!(result.player1.std.iter().all(|s| *s == 0.0));
    assert!(result.player2.std.iter().all(|s| *s == 0.0));
}

#[test]
fn test_closures_act_as_factories() {
    let game = pd();
    let defector = |_: &Arc<Game>, role: Role, _: u64| -> Box<dyn Agent> {
        Box::new(FixedAgent::new(1, role))
    };
    let cooperator = |_: &Arc<Game>, role: Role, _: u64| -> Box<dyn Agent> {
        Box::new(FixedAgent::new(0, role))
    };
    let result = run_repeated(&defector, &cooperator, &game, 3, 20, 0.0, 1).unwrap();
    assert_eq!(result.player1.mean, vec![5.0; 20]);
    assert_eq!(result.player2.mean, vec![0.0; 20]);
}

#[test]
fn test_observer_lifecycle_sequential() {
    let game = pd();
    let mut log = EventLog::default();
    let config = ExperimentConfig::default().with_total_steps(7).with_num_repeats(2);
    ExperimentPipeline::new(config)
        .with_observer(Box::new(&mut log))
        .run(&AgentKind::Fp, &AgentKind::Spam, &game)
        .unwrap();

    assert_eq!(
        log.events,
        vec!["start 2x7", "trial 0", "end 0", "trial 1", "end 1", "done"]
    );
    assert_eq!(log.steps, 14);
}

#[test]
fn test_observer_lifecycle_parallel() {
    let game = pd();
    let mut log = EventLog::default();
    let config = ExperimentConfig::default()
        .with_total_steps(7)
        .with_num_repeats(3)
        .with_parallel(true);
    ExperimentPipeline::new(config)
        .with_observer(Box::new(&mut log))
        .run(&AgentKind::Fp, &AgentKind::Spam, &game)
        .unwrap();

    assert_eq!(log.events, vec!["start 3x7", "end 0", "end 1", "end 2", "done"]);
    assert_eq!(log.steps, 0);
}

#[test]
fn test_metrics_observer_sees_noise() {
    let game = pd();
    let mut metrics = MetricsObserver::new();
    let config = ExperimentConfig::default()
        .with_total_steps(2_000)
        .with_num_repeats(2)
        .with_noise(0.05);
    let result = ExperimentPipeline::new(config)
        .with_observer(Box::new(&mut metrics))
        .run(&AgentKind::WolfPhc, &AgentKind::Fp, &game)
        .unwrap();

    let summary = metrics.summary();
    assert_eq!(summary.trials, 2);
    assert_eq!(summary.steps, 4_000);
    assert!(
        (summary.perturbation_rate - 0.05).abs() < 0.015,
        "{}",
        summary.perturbation_rate
    );
    let total: f64 = summary.joint_action_frequencies.iter().map(|(_, f)| f).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let (p1, _) = summary.mean_final_payoffs.unwrap();
    assert!((p1 - result.player1.last().unwrap().0).abs() < 1e-9);
}
