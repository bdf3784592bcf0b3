//! Result of a user action, for the host window to present.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action completed.
    Success(String),
    /// The input was rejected before anything was sent.
    Invalid(String),
    /// The backend call failed; state is as it was before the action.
    Failed(String),
}

impl Outcome {
    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(m) | Outcome::Invalid(m) | Outcome::Failed(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
