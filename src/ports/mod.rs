//! Ports (trait boundaries) for the simulation core.
//!
//! The harness only talks to agents and observers through these traits;
//! concrete learning rules and data collectors are adapters implementing them.

pub mod agent;
pub mod observer;

pub use agent::{Agent, AgentFactory, Outcome};
pub use observer::Observer;
