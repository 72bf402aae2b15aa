//! Built-in games used by the scenario driver

use super::{
    actions::ActionSet,
    payoff::{Game, PayoffMatrix},
};
use crate::{Error, Result};

/// Names accepted by [`game_by_name`]
pub const GAME_NAMES: &[&str] = &["pd", "chicken", "tricky"];

fn build(name: &str, actions: [&str; 2], payoffs: [[(f64, f64); 2]; 2]) -> Result<Game> {
    let mut entries = Vec::with_capacity(4);
    for (r, row) in actions.iter().enumerate() {
        for (c, column) in actions.iter().enumerate() {
            entries.push(((*row, *column), payoffs[r][c]));
        }
    }
    Game::new(
        name,
        PayoffMatrix::from_entries(entries)?,
        ActionSet::new(actions)?,
    )
}

/// Prisoner's dilemma: cooperate (C) or defect (D)
pub fn prisoners_dilemma() -> Result<Game> {
    build(
        "Prisoner's Dilemma",
        ["C", "D"],
        [[(3.0, 3.0), (0.0, 5.0)], [(5.0, 0.0), (1.0, 1.0)]],
    )
}

/// Chicken: swerve (C) or drive on (D)
pub fn chicken() -> Result<Game> {
    build(
        "Chicken",
        ["C", "D"],
        [[(4.0, 4.0), (2.0, 5.0)], [(5.0, 2.0), (0.0, 0.0)]],
    )
}

/// Asymmetric game whose cooperative outcome is (row a, column b)
pub fn tricky() -> Result<Game> {
    build(
        "Tricky Game",
        ["a", "b"],
        [[(0.0, 3.0), (3.0, 2.0)], [(1.0, 0.0), (2.0, 1.0)]],
    )
}

/// Look up a built-in game by its short name
pub fn game_by_name(name: &str) -> Result<Game> {
    match name.to_lowercase().as_str() {
        "pd" | "prisoners-dilemma" => prisoners_dilemma(),
        "chicken" => chicken(),
        "tricky" => tricky(),
        _ => Err(Error::UnknownGame {
            name: name.to_string(),
            expected: GAME_NAMES.join(", "),
        }),
    }
}
