//! Analysis of simulated payoff trajectories

pub mod stats;

pub use stats::{AggregateResult, Curve};
