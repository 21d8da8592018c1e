use std::fmt;

use crate::domain::DomainError;

pub const EMPTY_QUESTION_MESSAGE: &str = "Question cannot be empty";

/// Check that a question is present and not blank.
///
/// The untrimmed text is returned so it reaches the prompt unchanged.
pub fn validate_question(question: Option<&str>) -> Result<&str, DomainError> {
    match question {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(DomainError::validation(EMPTY_QUESTION_MESSAGE)),
    }
}

/// Which path produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOutcome {
    /// The advice provider answered
    Succeeded,
    /// The keyword classifier answered
    FellBack,
}

impl fmt::Display for TriageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "provider"),
            Self::FellBack => write!(f, "fallback"),
        }
    }
}

/// Result of triaging one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageAdvice {
    pub answer: String,
    pub outcome: TriageOutcome,
}

impl TriageAdvice {
    pub fn from_provider(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            outcome: TriageOutcome::Succeeded,
        }
    }

    pub fn from_fallback(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            outcome: TriageOutcome::FellBack,
        }
    }
}
