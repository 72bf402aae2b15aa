//! Guilt transitions for SPaM
//!
//! A player is guilty while its guilt is strictly positive. Guilt accrues when
//! a player deviates from the target joint action while nobody is guilty, and
//! is worked off by returning to the target.

use serde::{Deserialize, Serialize};

/// Smallest guilt a deviating player can carry
pub const GUILT_EPSILON: f64 = 1e-3;

/// The six guilt transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuiltCase {
    /// Guilty, back on target, partner on target: guilt cleared
    Reconciled,
    /// Guilty, back on target, partner deviated: guilt reduced, may reach zero
    Forgiven,
    /// Not guilty and on target: stays innocent
    Innocent,
    /// Guilty and still deviating: guilt tracks payoff, floored at epsilon
    Persisting,
    /// Not guilty, deviated while the partner is guilty: excused
    Excused,
    /// Not guilty, deviated while the partner is innocent: newly guilty
    Offended,
}

/// Everything a single guilt update depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuiltStep {
    /// Guilt before this round
    pub guilt: f64,
    /// Partner's guilt as seen at update time
    pub partner_guilt: f64,
    /// Whether this player executed its target component
    pub on_target: bool,
    /// Whether the partner executed its target component
    pub partner_on_target: bool,
    /// Payoff this player received this round
    pub payoff: f64,
    /// Payoff this player receives under the target joint action
    pub target_payoff: f64,
}

impl GuiltStep {
    /// Which of the six transitions applies
    pub fn case(&self) -> GuiltCase {
        let guilty = self.guilt > 0.0;
        match (guilty, self.on_target) {
            (true, true) if self.partner_on_target => GuiltCase::Reconciled,
            (true, true) => GuiltCase::Forgiven,
            (false, true) => GuiltCase::Innocent,
            (true, false) => GuiltCase::Persisting,
            (false, false) if self.partner_guilt > 0.0 => GuiltCase::Excused,
            (false, false) => GuiltCase::Offended,
        }
    }

    /// Apply the transition and return the case taken with the new guilt
    pub fn apply(&self) -> (GuiltCase, f64) {
        let case = self.case();
        let shortfall = self.payoff - self.target_payoff;
        let next = match case {
            GuiltCase::Reconciled | GuiltCase::Innocent | GuiltCase::Excused => 0.0,
            GuiltCase::Forgiven => (self.guilt + shortfall).max(0.0),
            GuiltCase::Persisting => GUILT_EPSILON.max(self.guilt + shortfall),
            GuiltCase::Offended => (shortfall + GUILT_EPSILON).max(GUILT_EPSILON),
        };
        (case, next)
    }
}

/// Next guilt value for `step`
pub fn next_guilt(step: GuiltStep) -> f64 {
    step.apply().1
}
