//! Typed errors raised at the grading engine's boundary.
//!
//! Grading itself never fails: ambiguous answers resolve through fallback
//! rules, not errors. These variants cover malformed input that must be
//! rejected before the engine runs, so callers can match on the cause
//! instead of inspecting error strings.

use thiserror::Error;

use crate::model::QuestionRef;

/// Errors produced while loading or validating grading input.
#[derive(Debug, Error)]
pub enum ExamError {
    /// A question type string did not name a known type.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// A question reference does not exist in the exam definition.
    #[error("question {0} not found in exam")]
    UnknownQuestion(QuestionRef),

    /// The submission did not have the expected shape.
    #[error("malformed submission: {0}")]
    MalformedSubmission(String),

    /// A configuration value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ExamError {
    /// Returns `true` if the error was caused by the submitted payload
    /// rather than the exam definition or local configuration.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            ExamError::MalformedSubmission(_) | ExamError::UnknownQuestion(_)
        )
    }
}
