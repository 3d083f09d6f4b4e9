use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes why a control surface did not accept a request
///
/// Both variants make the applier move on to the next candidate; they are kept apart so
/// that the final diagnostic can tell a missing access path from a refused value.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Refusal {
    /// The access path, method, or command does not exist in this version
    Unavailable(String),

    /// The access path exists but the value (or argument list) was refused
    Rejected(String),
}

impl Refusal {
    /// Allocates an `Unavailable` refusal
    pub fn unavailable(message: impl Into<String>) -> Self {
        Refusal::Unavailable(message.into())
    }

    /// Allocates a `Rejected` refusal
    pub fn rejected(message: impl Into<String>) -> Self {
        Refusal::Rejected(message.into())
    }

    /// Returns true if this is an `Unavailable` refusal
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Refusal::Unavailable(..))
    }

    /// Returns the message
    pub fn message(&self) -> &str {
        match self {
            Refusal::Unavailable(m) => m,
            Refusal::Rejected(m) => m,
        }
    }
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::Unavailable(m) => write!(f, "unavailable: {}", m),
            Refusal::Rejected(m) => write!(f, "rejected: {}", m),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
