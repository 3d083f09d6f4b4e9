use crate::target::Refusal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the label reported when the legacy text-command form succeeds
pub const LEGACY_LABEL: &str = "legacy";

/// Holds the outcome of applying one setting
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Outcome {
    /// The first candidate succeeded
    AppliedViaPrimary,

    /// A later candidate (or the legacy form, see [LEGACY_LABEL]) succeeded
    AppliedViaFallback(String),

    /// Every candidate and the legacy form failed
    Failed,
}

impl Outcome {
    /// Returns true if the setting was applied
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::Failed)
    }

    /// Returns true if the setting was applied by the legacy text command
    pub fn is_legacy(&self) -> bool {
        matches!(self, Outcome::AppliedViaFallback(label) if label == LEGACY_LABEL)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AppliedViaPrimary => write!(f, "applied-via-primary"),
            Outcome::AppliedViaFallback(name) => write!(f, "applied-via-fallback({})", name),
            Outcome::Failed => write!(f, "failed"),
        }
    }
}

/// Records one attempt
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    /// Candidate label or legacy command text
    pub label: String,

    /// Why the attempt was refused (None means accepted)
    pub refusal: Option<Refusal>,
}

/// Reports how one setting was applied
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApplyReport {
    /// Semantic key of the setting
    pub key: String,

    /// Requested value (debug form)
    pub value: String,

    /// Outcome
    pub outcome: Outcome,

    /// Attempts in the order they were made
    pub attempts: Vec<Attempt>,

    /// Message naming the manual remedy when the outcome is `Failed`
    pub diagnostic: Option<String>,
}

impl ApplyReport {
    /// Returns the number of attempts refused because the access path does not exist
    pub fn n_unavailable(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.refusal, Some(Refusal::Unavailable(..))))
            .count()
    }

    /// Returns the number of attempts refused because the value was rejected
    pub fn n_rejected(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.refusal, Some(Refusal::Rejected(..))))
            .count()
    }

    /// Returns the label of the accepted attempt, if any
    pub fn accepted_by(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.refusal.is_none())
            .map(|a| a.label.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ApplyReport, Attempt, Outcome};
    use crate::target::Refusal;

    #[test]
    fn outcome_display_works() {
        assert_eq!(format!("{}", Outcome::AppliedViaPrimary), "applied-via-primary");
        assert_eq!(
            format!("{}", Outcome::AppliedViaFallback("legacy".to_string())),
            "applied-via-fallback(legacy)"
        );
        assert_eq!(format!("{}", Outcome::Failed), "failed");
        assert!(Outcome::AppliedViaPrimary.is_applied());
        assert!(!Outcome::Failed.is_applied());
        assert!(Outcome::AppliedViaFallback("legacy".to_string()).is_legacy());
        assert!(!Outcome::AppliedViaFallback("solver.settings.x".to_string()).is_legacy());
        assert!(!Outcome::AppliedViaPrimary.is_legacy());
    }

    #[test]
    fn report_counts_work() {
        let report = ApplyReport {
            key: "gravity_vector".to_string(),
            value: "[0.0, 0.0, -9.81]".to_string(),
            outcome: Outcome::AppliedViaFallback("b".to_string()),
            attempts: vec![
                Attempt {
                    label: "a".to_string(),
                    refusal: Some(Refusal::unavailable("missing")),
                },
                Attempt {
                    label: "c".to_string(),
                    refusal: Some(Refusal::rejected("bad value")),
                },
                Attempt {
                    label: "b".to_string(),
                    refusal: None,
                },
            ],
            diagnostic: None,
        };
        assert_eq!(report.n_unavailable(), 1);
        assert_eq!(report.n_rejected(), 1);
        assert_eq!(report.accepted_by(), Some("b"));
    }
}
