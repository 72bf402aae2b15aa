//! Error types for the repeated-games crate

use thiserror::Error;

/// Main error type for the repeated-games crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("payoff matrix has no entries")]
    EmptyPayoffMatrix,

    #[error("action set is empty")]
    EmptyActionSet,

    #[error("action '{action}' appears more than once in the action set")]
    DuplicateAction { action: String },

    #[error("joint action ('{row}', '{column}') is listed more than once in the payoff matrix")]
    DuplicateJointAction { row: String, column: String },

    #[error("payoff matrix is not rectangular: joint action ('{row}', '{column}') is missing")]
    MissingJointAction { row: String, column: String },

    #[error("action set {actions:?} does not match the {side} actions of the payoff matrix {expected:?}")]
    ActionSetMismatch {
        side: String,
        actions: Vec<String>,
        expected: Vec<String>,
    },

    #[error("unknown action '{action}'")]
    UnknownAction { action: String },

    #[error("payoff {value} for joint action ('{row}', '{column}') is not finite")]
    NonFinitePayoff { row: String, column: String, value: f64 },

    #[error("noise probability {value} must lie in [0, 1]")]
    InvalidNoise { value: f64 },

    #[error("agent '{agent}' plays {actual} but was seated as the {expected} player")]
    RoleMismatch {
        agent: String,
        expected: String,
        actual: String,
    },

    #[error("cannot aggregate trials: {message}")]
    Aggregation { message: String },

    #[error("unknown game '{name}'. Expected one of: {expected}")]
    UnknownGame { name: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
