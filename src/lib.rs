//! Learning dynamics in repeated two-player matrix games
//!
//! This crate provides:
//! - Finite two-player matrix games with security (minimax) values
//! - Execution noise that perturbs intended actions
//! - Three learning rules: fictitious play, SPaM and WoLF-PHC
//! - A seeded simulation harness producing mean/std payoff curves
//! - A scenario driver comparing learners across built-in games

pub mod agents;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod scenario;
pub mod utils;

pub use agents::{AgentKind, FictitiousPlayAgent, SpamAgent, WolfPhcAgent};
pub use analysis::{AggregateResult, Curve};
pub use app::ExperimentConfig;
pub use error::{Error, Result};
pub use game::{ActionId, ActionSet, Game, NoiseModel, PayoffMatrix, Role, minimax};
pub use pipeline::{TrialResult, run_repeated, run_trial};
