//! Simulation harness
//!
//! This module provides:
//! - Single trials between a row and a column agent
//! - Repeated trials aggregated into mean/std payoff curves
//! - Observers recording what happens during an experiment

pub mod observers;
pub mod repeated;
pub mod trial;

// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use repeated::{ExperimentPipeline, run_repeated, trial_seeds};
pub use trial::{StepRecord, TrialResult, run_trial, run_trial_with};

pub use crate::ports::{Agent, AgentFactory, Observer};
