//! Grading results: per-question verdicts and the per-submission aggregate.

use serde::{Deserialize, Serialize};

use crate::matcher::GradingMode;
use crate::model::{QuestionRef, QuestionType};

/// The decision for one question in one grading pass.
///
/// Verdicts are never mutated; a regrade produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Position of the question in the exam.
    pub question: QuestionRef,
    /// Identifier of the question.
    pub question_id: String,
    /// Type of the question at grading time.
    pub question_type: QuestionType,
    /// Values as submitted.
    pub submitted: Vec<String>,
    /// Accepted answers, echoed for display.
    pub accepted: Vec<String>,
    /// Whether the answer was graded correct.
    pub is_correct: bool,
    /// Which grading path produced this verdict.
    pub mode: GradingMode,
}

/// Aggregate result of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// The exam that was graded.
    pub exam_id: String,
    /// Number of questions in the exam.
    pub total_questions: usize,
    /// Number of verdicts marked correct.
    pub correct_count: usize,
    /// Percentage score, 0-100.
    pub score: u8,
    /// Time spent on the attempt, passed through from the submission.
    pub elapsed_secs: u64,
    /// One verdict per question, in exam order.
    pub verdicts: Vec<Verdict>,
}

impl SubmissionResult {
    /// Derive the aggregate entirely from its verdicts.
    pub fn from_verdicts(exam_id: impl Into<String>, elapsed_secs: u64, verdicts: Vec<Verdict>) -> Self {
        let total_questions = verdicts.len();
        let correct_count = verdicts.iter().filter(|v| v.is_correct).count();
        Self {
            exam_id: exam_id.into(),
            total_questions,
            correct_count,
            score: compute_score(correct_count, total_questions),
            elapsed_secs,
            verdicts,
        }
    }

    /// Verdicts graded incorrect, in exam order.
    pub fn misses(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.is_correct)
    }
}

/// `round(correct / total * 100)`, rounding halves up; 0 when there are no questions.
pub fn compute_score(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct * 100 + total / 2) / total) as u8
}
