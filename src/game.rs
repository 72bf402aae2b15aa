//! Two-player matrix games
//!
//! This module provides the game layer shared by every learner:
//! - Action sets and player roles
//! - Payoff matrices with security (minimax) values
//! - The execution-noise model
//! - Built-in games (prisoner's dilemma, chicken, tricky game)

pub mod actions;
pub mod noise;
pub mod payoff;
pub mod presets;

pub use actions::{ActionId, ActionSet, Role};
pub use noise::NoiseModel;
pub use payoff::{Game, MatrixEntry, MatrixSpec, PayoffMatrix, minimax};
pub use presets::{GAME_NAMES, chicken, game_by_name, prisoners_dilemma, tricky};
