//! CLI infrastructure for the repeated-games toolkit
//!
//! This module provides the command-line interface for running matchups,
//! comparing learners across the built-in scenarios and inspecting games.

pub mod commands;
pub mod config;
pub mod output;

/// Initialise `env_logger`. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
