//! Action identifiers, action sets and player roles

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Which side of the payoff matrix a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Chooses the row; receives the first payoff component
    Row,
    /// Chooses the column; receives the second payoff component
    Column,
}

impl Role {
    /// Get the opposing role
    pub fn opponent(self) -> Role {
        match self {
            Role::Row => Role::Column,
            Role::Column => Role::Row,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Row => write!(f, "row"),
            Role::Column => write!(f, "column"),
        }
    }
}

/// Dense index of an action within an [`ActionSet`].
///
/// Ids follow the declaration order of the action set, which is also the
/// enumeration order used for every tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(usize);

impl ActionId {
    /// Create an id from a raw index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of distinct action labels shared by both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    labels: Vec<String>,
}

impl ActionSet {
    /// Create an action set, preserving declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSet`] for an empty list and
    /// [`Error::DuplicateAction`] if a label repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use repeated_games::game::ActionSet;
    ///
    /// let actions = ActionSet::new(["C", "D"]).unwrap();
    /// assert_eq!(actions.len(), 2);
    /// assert_eq!(actions.label(actions.id_of("D").unwrap()), "D");
    /// ```
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if collected.contains(&label) {
                return Err(Error::DuplicateAction { action: label });
            }
            collected.push(label);
        }
        if collected.is_empty() {
            return Err(Error::EmptyActionSet);
        }
        Ok(Self { labels: collected })
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set has no actions
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over action ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        (0..self.labels.len()).map(ActionId)
    }

    /// Label of an action
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this action set.
    pub fn label(&self, id: ActionId) -> &str {
        &self.labels[id.0]
    }

    /// Look up the id of a label
    pub fn id_of(&self, label: &str) -> Option<ActionId> {
        self.labels.iter().position(|l| l == label).map(ActionId)
    }

    /// Look up the id of a label, failing for unknown labels
    pub fn require(&self, label: &str) -> Result<ActionId> {
        self.id_of(label).ok_or_else(|| Error::UnknownAction {
            action: label.to_string(),
        })
    }

    /// All labels in declaration order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
