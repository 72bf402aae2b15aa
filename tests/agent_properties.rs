//! Behavioural properties of the three learning rules

mod common;

use std::sync::Arc;

use common::{FixedAgent, outcome_for, random_outcome};
use rand::{SeedableRng, rngs::StdRng};
use repeated_games::{
    ActionId, FictitiousPlayAgent, Game, NoiseModel, Role, SpamAgent, WolfPhcAgent,
    agents::target_joint_action,
    game::{GAME_NAMES, game_by_name, prisoners_dilemma, tricky},
    ports::Agent,
    run_trial,
};

fn all_games() -> Vec<Arc<Game>> {
    GAME_NAMES
        .iter()
        .map(|name| Arc::new(game_by_name(name).unwrap()))
        .collect()
}

#[test]
fn test_spam_guilt_never_negative() {
    let mut rng = StdRng::seed_from_u64(2024);
    for game in all_games() {
        for role in [Role::Row, Role::Column] {
            let mut agent = SpamAgent::with_seed(Arc::clone(&game), role, 11);
            for _ in 0..2_000 {
                let outcome = random_outcome(&game, role, &mut rng);
                agent.observe_outcome(&outcome);
                assert!(agent.own_guilt() >= 0.0, "own guilt {}", agent.own_guilt());
                assert!(agent.opponent_guilt() >= 0.0);
            }
            let record = agent.history().last().unwrap();
            assert_eq!(record.own_guilt, agent.own_guilt());
            assert_eq!(record.opponent_guilt, agent.opponent_guilt());
        }
    }
}

#[test]
fn test_spam_guilt_stays_zero_on_target() {
    for game in all_games() {
        let (row, column) = target_joint_action(&game);
        for role in [Role::Row, Role::Column] {
            let mut agent = SpamAgent::with_seed(Arc::clone(&game), role, 5);
            let (own, opponent) = match role {
                Role::Row => (row, column),
                Role::Column => (column, row),
            };
            for _ in 0..200 {
                agent.observe_outcome(&outcome_for(&game, role, own, opponent));
                assert_eq!(agent.own_guilt(), 0.0);
                assert_eq!(agent.opponent_guilt(), 0.0);
            }
            // With the opponent innocent the teaching set is the own target
            let teacher = agent.teacher_utilities();
            assert_eq!(teacher[own.index()], 1.0);
        }
    }
}

#[test]
fn test_spam_mostly_plays_target_against_cooperator() {
    let game = Arc::new(prisoners_dilemma().unwrap());
    let mut spam = SpamAgent::with_seed(Arc::clone(&game), Role::Row, 17);
    let mut cooperator = FixedAgent::new(0, Role::Column);
    let mut rng = StdRng::seed_from_u64(18);

    let result = run_trial(
        &mut spam,
        &mut cooperator,
        &game,
        500,
        &NoiseModel::none(),
        &mut rng,
    )
    .unwrap();
    // Mutual cooperation pays 3; SPaM defects only through exploration
    let (row_average, _) = result.final_averages().unwrap();
    assert!(row_average > 2.8, "row average {row_average}");
}

#[test]
fn test_wolf_policy_stays_a_distribution() {
    let mut rng = StdRng::seed_from_u64(7);
    for game in all_games() {
        for role in [Role::Row, Role::Column] {
            let mut agent = WolfPhcAgent::with_seed(Arc::clone(&game), role, 3);
            for _ in 0..1_000 {
                let outcome = random_outcome(&game, role, &mut rng);
                agent.observe_outcome(&outcome);

                let sum: f64 = agent.policy().iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "policy sums to {sum}");
                assert!(agent.policy().iter().all(|p| (0.0..=1.0).contains(p)));

                let average: f64 = agent.average_policy().iter().sum();
                assert!((average - 1.0).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_fictitious_play_converges_to_best_response() {
    // Row FP against a cooperator: defecting pays 5 > 3
    let game = Arc::new(prisoners_dilemma().unwrap());
    let mut fp = FictitiousPlayAgent::with_seed(Arc::clone(&game), Role::Row, 4);
    let mut cooperator = FixedAgent::new(0, Role::Column);
    let mut rng = StdRng::seed_from_u64(4);
    let result = run_trial(
        &mut fp,
        &mut cooperator,
        &game,
        100,
        &NoiseModel::none(),
        &mut rng,
    )
    .unwrap();
    for _ in 0..20 {
        assert_eq!(fp.choose_action(), ActionId::new(1));
    }
    assert!(result.final_averages().unwrap().0 > 4.9);

    // Column FP in the tricky game against a row player fixed on "a":
    // column "a" pays 3, column "b" pays 2
    let game = Arc::new(tricky().unwrap());
    let mut fp = FictitiousPlayAgent::with_seed(Arc::clone(&game), Role::Column, 9);
    let mut fixed_row = FixedAgent::new(0, Role::Row);
    run_trial(
        &mut fixed_row,
        &mut fp,
        &game,
        50,
        &NoiseModel::none(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(fp.choose_action(), ActionId::new(0));
    assert_eq!(fp.opponent_distribution().unwrap(), vec![1.0, 0.0]);
}
