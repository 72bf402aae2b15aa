//! Subcommands of the `repeated-games` binary

pub mod inspect;
pub mod run;
pub mod scenarios;
