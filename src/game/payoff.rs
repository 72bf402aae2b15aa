//! Payoff matrices, security values and the validated game description

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::BufReader,
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::actions::{ActionId, ActionSet, Role};
use crate::{Error, Result};

/// Complete rectangular payoff matrix of a two-player game.
///
/// Row and column action labels are the distinct key components, sorted, so
/// every scan over the matrix has a stable order independent of how the
/// entries were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffMatrix {
    row_actions: Vec<String>,
    column_actions: Vec<String>,
    /// Row-major `(row payoff, column payoff)` cells
    cells: Vec<(f64, f64)>,
}

impl PayoffMatrix {
    /// Build a matrix from `((row action, column action), (row payoff, column payoff))` entries.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPayoffMatrix`] when no entries are supplied
    /// - [`Error::DuplicateJointAction`] when a joint action is listed twice
    /// - [`Error::MissingJointAction`] when the entries do not cover the full
    ///   row × column cross product
    /// - [`Error::NonFinitePayoff`] for NaN or infinite payoffs
    ///
    /// # Examples
    ///
    /// ```
    /// use repeated_games::game::{PayoffMatrix, Role};
    ///
    /// let matrix = PayoffMatrix::from_entries([
    ///     (("C", "C"), (3.0, 3.0)),
    ///     (("C", "D"), (0.0, 5.0)),
    ///     (("D", "C"), (5.0, 0.0)),
    ///     (("D", "D"), (1.0, 1.0)),
    /// ])
    /// .unwrap();
    /// assert_eq!(matrix.security_value(Role::Row), 1.0);
    /// ```
    pub fn from_entries<I, R, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((R, C), (f64, f64))>,
        R: Into<String>,
        C: Into<String>,
    {
        let mut table: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
        for ((row, column), payoffs) in entries {
            let (row, column) = (row.into(), column.into());
            for value in [payoffs.0, payoffs.1] {
                if !value.is_finite() {
                    return Err(Error::NonFinitePayoff { row, column, value });
                }
            }
            if table.contains_key(&(row.clone(), column.clone())) {
                return Err(Error::DuplicateJointAction { row, column });
            }
            table.insert((row, column), payoffs);
        }

        if table.is_empty() {
            return Err(Error::EmptyPayoffMatrix);
        }

        let row_actions: Vec<String> = table
            .keys()
            .map(|(row, _)| row.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column_actions: Vec<String> = table
            .keys()
            .map(|(_, column)| column.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells = Vec::with_capacity(row_actions.len() * column_actions.len());
        for row in &row_actions {
            for column in &column_actions {
                let payoffs = table.get(&(row.clone(), column.clone())).ok_or_else(|| {
                    Error::MissingJointAction {
                        row: row.clone(),
                        column: column.clone(),
                    }
                })?;
                cells.push(*payoffs);
            }
        }

        Ok(Self {
            row_actions,
            column_actions,
            cells,
        })
    }

    /// Sorted row action labels
    pub fn row_actions(&self) -> &[String] {
        &self.row_actions
    }

    /// Sorted column action labels
    pub fn column_actions(&self) -> &[String] {
        &self.column_actions
    }

    /// Payoff pair for a joint action given by labels
    pub fn payoffs(&self, row: &str, column: &str) -> Option<(f64, f64)> {
        let r = self.row_actions.iter().position(|a| a == row)?;
        let c = self.column_actions.iter().position(|a| a == column)?;
        Some(self.cell(r, c))
    }

    /// Iterate over all joint actions, rows outermost, in sorted order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, (f64, f64))> + '_ {
        self.row_actions.iter().enumerate().flat_map(move |(r, row)| {
            self.column_actions
                .iter()
                .enumerate()
                .map(move |(c, column)| (row.as_str(), column.as_str(), self.cell(r, c)))
        })
    }

    fn cell(&self, row: usize, column: usize) -> (f64, f64) {
        self.cells[row * self.column_actions.len() + column]
    }

    /// Security (minimax) value: the best payoff `role` can guarantee itself
    /// against an adversarial opponent.
    ///
    /// For the row player this is the maximum over rows of the minimum row
    /// payoff across columns. The column player is treated symmetrically: the
    /// maximum over columns of the minimum column payoff across rows.
    pub fn security_value(&self, role: Role) -> f64 {
        match role {
            Role::Row => (0..self.row_actions.len())
                .map(|r| {
                    (0..self.column_actions.len())
                        .map(|c| self.cell(r, c).0)
                        .fold(f64::INFINITY, f64::min)
                })
                .fold(f64::NEG_INFINITY, f64::max),
            Role::Column => (0..self.column_actions.len())
                .map(|c| {
                    (0..self.row_actions.len())
                        .map(|r| self.cell(r, c).1)
                        .fold(f64::INFINITY, f64::min)
                })
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Security value of `role` in `matrix`.
pub fn minimax(matrix: &PayoffMatrix, role: Role) -> f64 {
    matrix.security_value(role)
}

/// A payoff matrix bound to the action set both players choose from.
///
/// Payoffs are re-indexed by [`ActionId`] so agents never touch labels on the
/// hot path.
#[derive(Debug, Clone)]
pub struct Game {
    name: String,
    matrix: PayoffMatrix,
    actions: ActionSet,
    /// `(row payoff, column payoff)` indexed by `row_id * n + column_id`
    table: Vec<(f64, f64)>,
    security: [f64; 2],
}

impl Game {
    /// Bind a matrix to an action set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionSetMismatch`] unless the action set contains
    /// exactly the matrix's row actions and exactly its column actions.
    pub fn new(name: impl Into<String>, matrix: PayoffMatrix, actions: ActionSet) -> Result<Self> {
        let declared: BTreeSet<&str> = actions.labels().iter().map(String::as_str).collect();
        for (side, expected) in [
            ("row", matrix.row_actions()),
            ("column", matrix.column_actions()),
        ] {
            let found: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
            if found != declared {
                return Err(Error::ActionSetMismatch {
                    side: side.to_string(),
                    actions: actions.labels().to_vec(),
                    expected: expected.to_vec(),
                });
            }
        }

        let mut table = Vec::with_capacity(actions.len() * actions.len());
        for row in actions.ids() {
            for column in actions.ids() {
                let payoffs = matrix
                    .payoffs(actions.label(row), actions.label(column))
                    .ok_or_else(|| Error::MissingJointAction {
                        row: actions.label(row).to_string(),
                        column: actions.label(column).to_string(),
                    })?;
                table.push(payoffs);
            }
        }

        let security = [
            matrix.security_value(Role::Row),
            matrix.security_value(Role::Column),
        ];

        Ok(Self {
            name: name.into(),
            matrix,
            actions,
            table,
            security,
        })
    }

    /// Display name of the game
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying payoff matrix
    pub fn matrix(&self) -> &PayoffMatrix {
        &self.matrix
    }

    /// Shared action set
    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Payoff pair for a joint action
    pub fn payoffs(&self, row: ActionId, column: ActionId) -> (f64, f64) {
        self.table[row.index() * self.actions.len() + column.index()]
    }

    /// Payoff received by `role` when it plays `own` against `opponent`
    pub fn payoff(&self, role: Role, own: ActionId, opponent: ActionId) -> f64 {
        match role {
            Role::Row => self.payoffs(own, opponent).0,
            Role::Column => self.payoffs(opponent, own).1,
        }
    }

    /// Payoff received by the opponent of `role` for the same joint action
    pub fn opponent_payoff(&self, role: Role, own: ActionId, opponent: ActionId) -> f64 {
        self.payoff(role.opponent(), opponent, own)
    }

    /// Cached security value of `role`
    pub fn security_value(&self, role: Role) -> f64 {
        match role {
            Role::Row => self.security[0],
            Role::Column => self.security[1],
        }
    }
}

/// One cell of a [`MatrixSpec`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub row: String,
    pub column: String,
    /// `[row payoff, column payoff]`
    pub payoffs: [f64; 2],
}

/// JSON description of a custom game
///
/// ```json
/// {
///   "name": "stag hunt",
///   "actions": ["S", "H"],
///   "entries": [
///     { "row": "S", "column": "S", "payoffs": [4, 4] },
///     { "row": "S", "column": "H", "payoffs": [0, 3] },
///     { "row": "H", "column": "S", "payoffs": [3, 0] },
///     { "row": "H", "column": "H", "payoffs": [3, 3] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSpec {
    #[serde(default = "MatrixSpec::default_name")]
    pub name: String,
    pub actions: Vec<String>,
    pub entries: Vec<MatrixEntry>,
}

impl MatrixSpec {
    fn default_name() -> String {
        "custom".to_string()
    }

    /// Describe an existing game
    pub fn from_game(game: &Game) -> Self {
        Self {
            name: game.name().to_string(),
            actions: game.actions().labels().to_vec(),
            entries: game
                .matrix()
                .entries()
                .map(|(row, column, (r, c))| MatrixEntry {
                    row: row.to_string(),
                    column: column.to_string(),
                    payoffs: [r, c],
                })
                .collect(),
        }
    }

    /// Validate and build the game
    pub fn build(&self) -> Result<Game> {
        let matrix = PayoffMatrix::from_entries(self.entries.iter().map(|entry| {
            (
                (entry.row.clone(), entry.column.clone()),
                (entry.payoffs[0], entry.payoffs[1]),
            )
        }))?;
        let actions = ActionSet::new(self.actions.iter().cloned())?;
        Game::new(self.name.clone(), matrix, actions)
    }

    /// Load a game description from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Game> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open game file {}", path.display()),
            source,
        })?;
        let spec: MatrixSpec = serde_json::from_reader(BufReader::new(file))?;
        spec.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pd_matrix() -> PayoffMatrix {
        PayoffMatrix::from_entries([
            (("C", "C"), (3.0, 3.0)),
            (("C", "D"), (0.0, 5.0)),
            (("D", "C"), (5.0, 0.0)),
            (("D", "D"), (1.0, 1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_security_values_prisoners_dilemma() {
        let matrix = pd_matrix();
        assert_eq!(minimax(&matrix, Role::Row), 1.0);
        assert_eq!(minimax(&matrix, Role::Column), 1.0);
    }

    #[test]
    fn test_security_values_asymmetric_game() {
        // Row: min(a)=0, min(b)=1 -> 1. Column: min(col a)=0, min(col b)=1 -> 1.
        let matrix = PayoffMatrix::from_entries([
            (("a", "a"), (0.0, 3.0)),
            (("a", "b"), (3.0, 2.0)),
            (("b", "a"), (1.0, 0.0)),
            (("b", "b"), (2.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(matrix.security_value(Role::Row), 1.0);
        assert_eq!(matrix.security_value(Role::Column), 1.0);
    }

    #[test]
    fn test_rows_are_sorted_regardless_of_input_order() {
        let matrix = PayoffMatrix::from_entries([
            (("D", "D"), (1.0, 1.0)),
            (("C", "D"), (0.0, 5.0)),
            (("D", "C"), (5.0, 0.0)),
            (("C", "C"), (3.0, 3.0)),
        ])
        .unwrap();
        assert_eq!(matrix.row_actions(), ["C", "D"]);
        assert_eq!(matrix.payoffs("C", "D"), Some((0.0, 5.0)));
    }

    #[test]
    fn test_missing_joint_action_is_rejected() {
        let result = PayoffMatrix::from_entries([
            (("C", "C"), (3.0, 3.0)),
            (("C", "D"), (0.0, 5.0)),
            (("D", "C"), (5.0, 0.0)),
        ]);
        assert!(matches!(
            result,
            Err(Error::MissingJointAction { row, column }) if row == "D" && column == "D"
        ));
    }

    #[test]
    fn test_empty_and_duplicate_matrices_are_rejected() {
        let empty: Vec<((String, String), (f64, f64))> = Vec::new();
        assert!(matches!(
            PayoffMatrix::from_entries(empty),
            Err(Error::EmptyPayoffMatrix)
        ));
        assert!(matches!(
            PayoffMatrix::from_entries([(("C", "C"), (1.0, 1.0)), (("C", "C"), (2.0, 2.0))]),
            Err(Error::DuplicateJointAction { .. })
        ));
    }

    #[test]
    fn test_game_reindexes_by_declared_order() {
        let actions = ActionSet::new(["D", "C"]).unwrap();
        let game = Game::new("pd", pd_matrix(), actions).unwrap();
        let d = game.actions().require("D").unwrap();
        let c = game.actions().require("C").unwrap();
        assert_eq!(d.index(), 0);
        assert_eq!(game.payoffs(d, c), (5.0, 0.0));
        assert_eq!(game.payoff(Role::Column, d, c), 5.0);
        assert_eq!(game.opponent_payoff(Role::Column, d, c), 0.0);
    }

    #[test]
    fn test_game_rejects_mismatched_action_set() {
        let actions = ActionSet::new(["C", "D", "X"]).unwrap();
        assert!(matches!(
            Game::new("pd", pd_matrix(), actions),
            Err(Error::ActionSetMismatch { .. })
        ));
    }
}
