//! Answer matchers: the comparison strategies behind a single interface.
//!
//! Objective questions always use [`ExactMatcher`]. Free-text questions use
//! [`StrictMatcher`] when a submission is first graded and [`FuzzyMatcher`]
//! in the retry/review flow. The two text matchers apply different criteria
//! to the same question, so an answer of unchanged quality can be marked
//! wrong at submission and right on retry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GradingConfig;
use crate::model::{Question, QuestionType};
use crate::normalize::normalize;
use crate::similarity::best_similarity;
use crate::splitter::try_split;

/// Which call site a verdict was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMode {
    /// Initial submission grading.
    Strict,
    /// Retry and self-check grading.
    Fuzzy,
}

impl fmt::Display for GradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingMode::Strict => write!(f, "strict"),
            GradingMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A strategy deciding whether submitted values answer a question correctly.
pub trait AnswerMatcher {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Decide correctness. Never fails: ambiguous input grades as incorrect
    /// or falls back to a coarser comparison.
    fn is_correct(&self, question: &Question, values: &[String]) -> bool;
}

/// Order-independent, cardinality-exact comparison for fixed-choice questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl AnswerMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn is_correct(&self, question: &Question, values: &[String]) -> bool {
        if values.is_empty() || values.len() != question.accepted_answers.len() {
            return false;
        }

        let mut submitted: Vec<&str> = values.iter().map(String::as_str).collect();
        let mut accepted: Vec<&str> = question
            .accepted_answers
            .iter()
            .map(String::as_str)
            .collect();
        submitted.sort_unstable();
        accepted.sort_unstable();

        submitted == accepted
    }
}

/// Case- and whitespace-insensitive equality against any accepted answer.
///
/// When a single value splits into one piece per accepted answer, every
/// piece must match its positional counterpart instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictMatcher;

impl AnswerMatcher for StrictMatcher {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn is_correct(&self, question: &Question, values: &[String]) -> bool {
        let Some(first) = values.first() else {
            return false;
        };

        if let Some(pairing) = try_split(values, &question.accepted_answers) {
            return pairing.all(|piece, accepted| normalize(piece) == normalize(accepted));
        }

        let candidate = normalize(first);
        question
            .accepted_answers
            .iter()
            .any(|accepted| normalize(accepted) == candidate)
    }
}

/// Similarity-threshold comparison used in the retry/review flow.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    pub short_answer_threshold: f64,
    pub essay_threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(config: &GradingConfig) -> Self {
        Self {
            short_answer_threshold: config.short_answer_threshold,
            essay_threshold: config.essay_threshold,
        }
    }

    /// The threshold applied to a question type.
    pub fn threshold_for(&self, question_type: QuestionType) -> f64 {
        match question_type {
            QuestionType::Essay => self.essay_threshold,
            QuestionType::ShortAnswer | QuestionType::Objective | QuestionType::TrueFalse => {
                self.short_answer_threshold
            }
        }
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(&GradingConfig::default())
    }
}

impl AnswerMatcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn is_correct(&self, question: &Question, values: &[String]) -> bool {
        let Some(candidate) = values.first() else {
            return false;
        };
        let score = best_similarity(candidate, &question.accepted_answers);
        let threshold = self.threshold_for(question.question_type);
        tracing::debug!(question = %question.id, score, threshold, "fuzzy match");
        score >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::similarity;
    use std::collections::BTreeMap;

    fn question(question_type: QuestionType, accepted: &[&str]) -> Question {
        Question {
            id: "q".into(),
            text: "?".into(),
            question_type,
            options: if question_type.is_objective() {
                vec!["학습 능력".into(), "크기".into(), "가격".into(), "색상".into()]
            } else {
                vec![]
            },
            accepted_answers: accepted.iter().map(|s| s.to_string()).collect(),
            explanation: None,
            wrong_answer_explanations: BTreeMap::new(),
        }
    }

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_single_choice() {
        let q = question(QuestionType::Objective, &["1"]);
        assert!(ExactMatcher.is_correct(&q, &values(&["1"])));
        assert!(!ExactMatcher.is_correct(&q, &values(&["2"])));
    }

    #[test]
    fn exact_is_order_independent() {
        let q = question(QuestionType::Objective, &["1", "3", "4"]);
        assert!(ExactMatcher.is_correct(&q, &values(&["4", "1", "3"])));
        assert!(ExactMatcher.is_correct(&q, &values(&["3", "4", "1"])));
    }

    #[test]
    fn exact_rejects_superset_and_subset() {
        let q = question(QuestionType::Objective, &["1", "3"]);
        assert!(!ExactMatcher.is_correct(&q, &values(&["1", "2", "3"])));
        assert!(!ExactMatcher.is_correct(&q, &values(&["1"])));
        assert!(!ExactMatcher.is_correct(&q, &values(&["1", "1"])));
    }

    #[test]
    fn exact_rejects_empty_submission() {
        let q = question(QuestionType::TrueFalse, &["1"]);
        assert!(!ExactMatcher.is_correct(&q, &[]));
    }

    #[test]
    fn strict_ignores_case_and_space() {
        let q = question(QuestionType::ShortAnswer, &["산", "강", "달"]);
        assert!(StrictMatcher.is_correct(&q, &values(&[" 산 "])));
        let q = question(QuestionType::ShortAnswer, &["Machine Learning"]);
        assert!(StrictMatcher.is_correct(&q, &values(&["machinelearning"])));
        assert!(!StrictMatcher.is_correct(&q, &values(&["deep learning"])));
    }

    #[test]
    fn strict_multi_blank_is_conjunctive() {
        let q = question(QuestionType::ShortAnswer, &["표준설", "과실"]);
        assert!(StrictMatcher.is_correct(&q, &values(&["표준설, 과실"])));
        assert!(!StrictMatcher.is_correct(&q, &values(&["표준설, 실수"])));
        assert!(!StrictMatcher.is_correct(&q, &values(&["표준설,과실,여분"])));
    }

    #[test]
    fn strict_split_is_positional() {
        let q = question(QuestionType::ShortAnswer, &["표준설", "과실"]);
        assert!(!StrictMatcher.is_correct(&q, &values(&["과실, 표준설"])));
    }

    #[test]
    fn strict_rejects_empty_submission() {
        let q = question(QuestionType::Essay, &["anything"]);
        assert!(!StrictMatcher.is_correct(&q, &[]));
    }

    /// A 100-token accepted answer and a 100-token candidate sharing the
    /// first `shared` tokens, so the overlap score is `shared / 100`.
    fn overlap(shared: usize) -> (String, String) {
        let accepted: Vec<String> = (0..100).map(|i| format!("w{i}")).collect();
        let candidate: Vec<String> = (0..100)
            .map(|i| if i < shared { format!("w{i}") } else { format!("x{i}") })
            .collect();
        (accepted.join(" "), candidate.join(" "))
    }

    fn fuzzy_grade(question_type: QuestionType, shared: usize) -> bool {
        let (accepted, candidate) = overlap(shared);
        let q = question(question_type, &[accepted.as_str()]);
        FuzzyMatcher::default().is_correct(&q, &[candidate])
    }

    #[test]
    fn overlap_fixture_scores_exact_fractions() {
        let (accepted, candidate) = overlap(89);
        assert_eq!(similarity(&candidate, &accepted), 0.89);
        let (accepted, candidate) = overlap(69);
        assert_eq!(similarity(&candidate, &accepted), 0.69);
    }

    #[test]
    fn fuzzy_short_answer_threshold_boundary() {
        assert!(fuzzy_grade(QuestionType::ShortAnswer, 90));
        assert!(!fuzzy_grade(QuestionType::ShortAnswer, 89));
    }

    #[test]
    fn fuzzy_essay_threshold_boundary() {
        assert!(fuzzy_grade(QuestionType::Essay, 70));
        assert!(!fuzzy_grade(QuestionType::Essay, 69));
    }

    #[test]
    fn fuzzy_essay_containment_is_enough() {
        let q = question(QuestionType::Essay, &["인간의 지능을 모방하는 시스템을 만드는 기술"]);
        assert!(FuzzyMatcher::default().is_correct(&q, &values(&["인간의 지능을 모방하는 시스템"])));

        let q = question(QuestionType::ShortAnswer, &["인간의 지능을 모방하는 시스템을 만드는 기술"]);
        assert!(!FuzzyMatcher::default().is_correct(&q, &values(&["인간의 지능을 모방하는 시스템"])));
    }

    #[test]
    fn strict_and_fuzzy_can_disagree() {
        let q = question(QuestionType::Essay, &["인간의 지능을 모방하는 시스템을 만드는 기술"]);
        let answer = values(&["인간의 지능을 모방하는 시스템"]);
        assert!(!StrictMatcher.is_correct(&q, &answer));
        assert!(FuzzyMatcher::default().is_correct(&q, &answer));
    }

    #[test]
    fn fuzzy_rejects_blank_candidate() {
        let q = question(QuestionType::Essay, &["anything at all"]);
        assert!(!FuzzyMatcher::default().is_correct(&q, &values(&["   "])));
        assert!(!FuzzyMatcher::default().is_correct(&q, &[]));
    }
}
