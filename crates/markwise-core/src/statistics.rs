//! Per-type and per-group accuracy breakdowns of a graded submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionType;
use crate::results::SubmissionResult;

/// Accuracy over a subset of verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeStats {
    /// Number of questions in the subset.
    pub total: usize,
    /// Number answered correctly.
    pub correct: usize,
    /// `correct / total`, or 0 for an empty subset.
    pub accuracy: f64,
}

impl TypeStats {
    fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
        self.accuracy = self.correct as f64 / self.total as f64;
    }
}

/// Accuracy split by question type and by group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub per_type: BTreeMap<QuestionType, TypeStats>,
    /// Keyed by zero-based group index.
    pub per_group: BTreeMap<usize, TypeStats>,
}

/// Compute the breakdown of a submission result.
pub fn compute_breakdown(result: &SubmissionResult) -> Breakdown {
    let mut breakdown = Breakdown::default();
    for verdict in &result.verdicts {
        breakdown
            .per_type
            .entry(verdict.question_type)
            .or_default()
            .record(verdict.is_correct);
        breakdown
            .per_group
            .entry(verdict.question.group)
            .or_default()
            .record(verdict.is_correct);
    }
    breakdown
}
