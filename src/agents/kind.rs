//! Selection of a learning rule by name

use std::{fmt, sync::Arc};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{FictitiousPlayAgent, SpamAgent, WolfPhcAgent};
use crate::{
    game::{Game, Role},
    ports::{Agent, AgentFactory},
};

/// The available learning rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Guilt-driven teacher/follower
    Spam,
    /// Fictitious play
    Fp,
    /// Win-or-learn-fast policy hill climbing
    WolfPhc,
}

impl AgentKind {
    /// Every rule, in reporting order
    pub const ALL: [AgentKind; 3] = [AgentKind::Spam, AgentKind::Fp, AgentKind::WolfPhc];

    /// Name used in reports
    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Spam => "SPaM",
            AgentKind::Fp => "FP",
            AgentKind::WolfPhc => "WoLF-PHC",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl AgentFactory for AgentKind {
    fn build(&self, game: &Arc<Game>, role: Role, seed: u64) -> Box<dyn Agent> {
        let game = Arc::clone(game);
        match self {
            AgentKind::Spam => Box::new(SpamAgent::with_seed(game, role, seed)),
            AgentKind::Fp => Box::new(FictitiousPlayAgent::with_seed(game, role, seed)),
            AgentKind::WolfPhc => Box::new(WolfPhcAgent::with_seed(game, role, seed)),
        }
    }
}
