//! Central grading orchestrator.
//!
//! Sweeps an exam definition in order, dispatches each question to the
//! matcher for its type, and folds the verdicts into a submission result.
//! Grading is a pure, single-threaded computation over validated input.

use std::collections::HashMap;

use crate::config::GradingConfig;
use crate::error::ExamError;
use crate::matcher::{AnswerMatcher, ExactMatcher, FuzzyMatcher, GradingMode, StrictMatcher};
use crate::model::{Exam, Question, QuestionRef, QuestionType, Submission};
use crate::results::{SubmissionResult, Verdict};
use crate::splitter::BLANK_DELIMITER;

/// The grading engine.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    exact: ExactMatcher,
    strict: StrictMatcher,
    fuzzy: FuzzyMatcher,
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new(&GradingConfig::default())
    }
}

impl GradingEngine {
    pub fn new(config: &GradingConfig) -> Self {
        Self {
            exact: ExactMatcher,
            strict: StrictMatcher,
            fuzzy: FuzzyMatcher::new(config),
        }
    }

    /// Grade a full submission with the strict matcher.
    ///
    /// Every question in the exam gets exactly one verdict; unanswered
    /// questions grade as incorrect. Answers pointing at questions the exam
    /// does not define are ignored. If a question is answered more than
    /// once, the first answer wins.
    pub fn grade(&self, exam: &Exam, submission: &Submission) -> SubmissionResult {
        if submission.exam_id != exam.id {
            tracing::warn!(
                "submission targets exam '{}' but is graded against '{}'",
                submission.exam_id,
                exam.id
            );
        }

        let mut answers: HashMap<QuestionRef, &[String]> = HashMap::new();
        for answer in &submission.answers {
            if exam.question(answer.question).is_none() {
                tracing::warn!("ignoring answer for unknown question {}", answer.question);
                continue;
            }
            if answers.contains_key(&answer.question) {
                tracing::warn!("ignoring duplicate answer for question {}", answer.question);
                continue;
            }
            answers.insert(answer.question, answer.values.as_slice());
        }

        let verdicts: Vec<Verdict> = exam
            .iter_questions()
            .map(|(at, _, question)| {
                let values = answers.get(&at).copied().unwrap_or_default();
                self.grade_question(question, at, values, GradingMode::Strict)
            })
            .collect();

        let result = SubmissionResult::from_verdicts(&exam.id, submission.elapsed_secs, verdicts);
        tracing::info!(
            exam = %exam.id,
            correct = result.correct_count,
            total = result.total_questions,
            score = result.score,
            "graded submission"
        );
        result
    }

    /// Grade a single retry answer with the fuzzy matcher.
    ///
    /// For objective questions the candidate is a comma-separated list of
    /// option numbers, so multi-select questions can be retried too.
    pub fn retry(&self, exam: &Exam, at: QuestionRef, candidate: &str) -> Result<Verdict, ExamError> {
        let question = exam.question(at).ok_or(ExamError::UnknownQuestion(at))?;
        let values: Vec<String> = if question.question_type.is_objective() {
            candidate
                .split(BLANK_DELIMITER)
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            vec![candidate.to_string()]
        };
        Ok(self.grade_question(question, at, &values, GradingMode::Fuzzy))
    }

    /// Grade one question's values in the given mode.
    pub fn grade_question(
        &self,
        question: &Question,
        at: QuestionRef,
        values: &[String],
        mode: GradingMode,
    ) -> Verdict {
        let matcher = self.matcher_for(question.question_type, mode);
        let is_correct = matcher.is_correct(question, values);
        tracing::debug!(
            question = %at,
            matcher = matcher.name(),
            is_correct,
            "graded question"
        );

        Verdict {
            question: at,
            question_id: question.id.clone(),
            question_type: question.question_type,
            submitted: values.to_vec(),
            accepted: question.accepted_answers.clone(),
            is_correct,
            mode,
        }
    }

    fn matcher_for(&self, question_type: QuestionType, mode: GradingMode) -> &dyn AnswerMatcher {
        match (question_type, mode) {
            (QuestionType::Objective | QuestionType::TrueFalse, _) => &self.exact,
            (QuestionType::ShortAnswer | QuestionType::Essay, GradingMode::Strict) => &self.strict,
            (QuestionType::ShortAnswer | QuestionType::Essay, GradingMode::Fuzzy) => &self.fuzzy,
        }
    }
}
