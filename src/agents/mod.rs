//! Learning rules for repeated two-player matrix games
//!
//! Every agent implements [`crate::ports::Agent`] and owns a seeded random
//! source:
//! - [`FictitiousPlayAgent`]: best response to empirical opponent frequencies
//! - [`SpamAgent`]: guilt-driven teaching and following
//! - [`WolfPhcAgent`]: win-or-learn-fast policy hill climbing

pub mod fictitious_play;
pub mod guilt;
pub mod kind;
pub mod spam;
pub mod wolf_phc;

pub use fictitious_play::FictitiousPlayAgent;
pub use guilt::{GUILT_EPSILON, GuiltCase, GuiltStep, next_guilt};
pub use kind::AgentKind;
pub use spam::{RoundRecord, SpamAgent, target_joint_action};
pub use wolf_phc::WolfPhcAgent;
