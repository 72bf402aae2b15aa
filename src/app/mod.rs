//! Application layer: experiment configuration.
//!
//! Configuration lives outside the simulation core so the harness only ever
//! sees validated values. The CLI loads an [`ExperimentConfig`] from JSON (or
//! starts from the defaults) and lets command-line flags override fields.
//!
//! ```
//! use repeated_games::app::ExperimentConfig;
//!
//! let config = ExperimentConfig::default().with_parallel(true);
//! config.validate()?;
//! # Ok::<(), repeated_games::Error>(())
//! ```

pub mod config;

pub use config::ExperimentConfig;
