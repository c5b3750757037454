//! Score accrual and completion-percentage arithmetic.
//!
//! The repository layer loads the locked user row and the ledger counts
//! inside the completion transaction and asks this module what the new
//! aggregate values are.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ACCRUAL_INCREMENTAL: &str = "incremental";
pub const ACCRUAL_RECOMPUTE: &str = "recompute";

/// All valid `SCORE_ACCRUAL` values.
pub const VALID_ACCRUAL_MODES: &[&str] = &[ACCRUAL_INCREMENTAL, ACCRUAL_RECOMPUTE];

/// Upper bound for the completion percentage.
pub const FULL_PROGRESS: f64 = 100.0;

// ---------------------------------------------------------------------------
// Accrual policy
// ---------------------------------------------------------------------------

/// How a completion award is folded into `users.score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAccrual {
    /// Every completion adds its score, including repeat completions of a
    /// module that is already done.
    #[default]
    Incremental,
    /// The user score is the sum of the latest score of every completed
    /// module, so repeating a module replaces its contribution.
    Recompute,
}

impl ScoreAccrual {
    /// Parse a configuration value (case-insensitive).
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            ACCRUAL_INCREMENTAL => Ok(Self::Incremental),
            ACCRUAL_RECOMPUTE => Ok(Self::Recompute),
            other => Err(CoreError::Validation(format!(
                "Invalid score accrual '{other}'. Must be one of: {}",
                VALID_ACCRUAL_MODES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incremental => ACCRUAL_INCREMENTAL,
            Self::Recompute => ACCRUAL_RECOMPUTE,
        }
    }
}

/// Reject a negative completion award; `users.score` never goes down
/// under the incremental policy.
pub fn validate_award(score: i32) -> Result<i32, CoreError> {
    if score < 0 {
        return Err(CoreError::Validation(
            "score must not be negative".to_string(),
        ));
    }
    Ok(score)
}

/// Compute the user score after a completion award.
///
/// `ledger_sum` is the sum of the user's completed ledger scores *after*
/// the ledger row for this completion was written. It is ignored by the
/// incremental policy.
pub fn next_score(current: i64, award: i64, ledger_sum: i64, accrual: ScoreAccrual) -> i64 {
    match accrual {
        ScoreAccrual::Incremental => current.saturating_add(award),
        ScoreAccrual::Recompute => ledger_sum,
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Percentage of the catalog a user has completed.
///
/// Returns `0.0` for an empty catalog. Counts above `total` (stale ledger
/// rows) are clamped to 100.
pub fn completion_percentage(completed: i64, total: i64) -> f64 {
    if total <= 0 || completed <= 0 {
        return 0.0;
    }
    let pct = (completed as f64 / total as f64) * FULL_PROGRESS;
    pct.min(FULL_PROGRESS)
}

/// Round a percentage to two decimal places for reporting.
pub fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- ScoreAccrual -------------------------------------------------------

    #[test]
    fn accrual_parses_known_values() {
        assert_eq!(
            ScoreAccrual::from_str_value("incremental").unwrap(),
            ScoreAccrual::Incremental
        );
        assert_eq!(
            ScoreAccrual::from_str_value(" Recompute ").unwrap(),
            ScoreAccrual::Recompute
        );
    }

    #[test]
    fn accrual_rejects_unknown_value() {
        assert!(ScoreAccrual::from_str_value("sometimes").is_err());
    }

    #[test]
    fn accrual_defaults_to_incremental() {
        assert_eq!(ScoreAccrual::default(), ScoreAccrual::Incremental);
        assert_eq!(ScoreAccrual::default().as_str(), ACCRUAL_INCREMENTAL);
    }

    // -- validate_award -----------------------------------------------------

    #[test]
    fn award_of_zero_or_more_is_accepted() {
        assert_eq!(validate_award(0).unwrap(), 0);
        assert_eq!(validate_award(25).unwrap(), 25);
    }

    #[test]
    fn negative_award_rejects() {
        match validate_award(-5) {
            Err(CoreError::Validation(msg)) => assert_eq!(msg, "score must not be negative"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    // -- next_score ---------------------------------------------------------

    #[test]
    fn incremental_adds_every_award() {
        let after_first = next_score(0, 30, 30, ScoreAccrual::Incremental);
        let after_repeat = next_score(after_first, 50, 50, ScoreAccrual::Incremental);
        assert_eq!(after_repeat, 80);
    }

    #[test]
    fn recompute_takes_ledger_sum() {
        let after_first = next_score(0, 30, 30, ScoreAccrual::Recompute);
        let after_repeat = next_score(after_first, 50, 50, ScoreAccrual::Recompute);
        assert_eq!(after_repeat, 50);
    }

    #[test]
    fn incremental_saturates() {
        assert_eq!(next_score(i64::MAX, 1, 0, ScoreAccrual::Incremental), i64::MAX);
    }

    // -- completion_percentage ----------------------------------------------

    #[test]
    fn empty_catalog_is_zero() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(completion_percentage(3, 0), 0.0);
    }

    #[test]
    fn partial_completion() {
        assert_eq!(completion_percentage(1, 4), 25.0);
        assert!((completion_percentage(1, 3) - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn full_completion_is_capped() {
        assert_eq!(completion_percentage(4, 4), 100.0);
        assert_eq!(completion_percentage(5, 4), 100.0);
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round_two_places(33.333_333), 33.33);
        assert_eq!(round_two_places(66.666_666), 66.67);
        assert_eq!(round_two_places(0.0), 0.0);
    }
}
