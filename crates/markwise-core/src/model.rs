//! Core data model types for markwise.
//!
//! These are the fundamental types the grading engine consumes: exam
//! definitions made of question groups, and the submissions graded
//! against them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ExamError;

/// The kind of a question, which decides how its answers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Fixed-choice question, possibly multi-select.
    Objective,
    /// Free text matched against a few literal answers.
    ShortAnswer,
    /// Free text graded against reference answers.
    Essay,
    /// Presentational two-choice variant of [`QuestionType::Objective`].
    TrueFalse,
}

impl QuestionType {
    /// Returns `true` for types graded by exact choice matching.
    pub fn is_objective(&self) -> bool {
        matches!(self, QuestionType::Objective | QuestionType::TrueFalse)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Objective => write!(f, "objective"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::Essay => write!(f, "essay"),
            QuestionType::TrueFalse => write!(f, "true_false"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "objective" | "multiple_choice" | "choice" => Ok(QuestionType::Objective),
            "short_answer" | "short-answer" | "shortanswer" | "subjective" => {
                Ok(QuestionType::ShortAnswer)
            }
            "essay" => Ok(QuestionType::Essay),
            "true_false" | "true-false" | "ox" => Ok(QuestionType::TrueFalse),
            other => Err(ExamError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// A single question inside a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the exam.
    pub id: String,
    /// The question text shown to the student.
    pub text: String,
    /// How answers to this question are compared.
    pub question_type: QuestionType,
    /// Choice labels; only meaningful for objective questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Canonical answers. For objective questions these are 1-based option indexes.
    pub accepted_answers: Vec<String>,
    /// General explanation shown after grading.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Targeted remediation keyed by option index.
    #[serde(default)]
    pub wrong_answer_explanations: BTreeMap<String, String>,
}

/// An ordered block of questions sharing an optional prompt (e.g. a reading passage).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGroup {
    /// Shared prompt displayed above the group's questions.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A complete exam definition. The definition, not the submission, drives
/// iteration order during grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier for this exam.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Description of this exam.
    #[serde(default)]
    pub description: String,
    /// Question groups in display order.
    #[serde(default)]
    pub groups: Vec<QuestionGroup>,
}

impl Exam {
    /// Total number of questions across all groups.
    pub fn total_questions(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }

    /// Look up a question by reference.
    pub fn question(&self, at: QuestionRef) -> Option<&Question> {
        self.groups.get(at.group)?.questions.get(at.question)
    }

    /// Iterate over every question in definition order.
    pub fn iter_questions(&self) -> impl Iterator<Item = (QuestionRef, &QuestionGroup, &Question)> {
        self.groups.iter().enumerate().flat_map(|(gi, group)| {
            group
                .questions
                .iter()
                .enumerate()
                .map(move |(qi, question)| (QuestionRef::new(gi, qi), group, question))
        })
    }
}

/// Position of a question inside an exam: zero-based group and question indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionRef {
    pub group: usize,
    pub question: usize,
}

impl QuestionRef {
    pub fn new(group: usize, question: usize) -> Self {
        Self { group, question }
    }
}

/// Displayed 1-based, the way question numbers are shown to students.
impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.group + 1, self.question + 1)
    }
}

/// The answer given to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// Which question this answers.
    #[serde(flatten)]
    pub question: QuestionRef,
    /// Submitted values. Empty means unanswered.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A full set of answers for one exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// The exam this submission answers.
    pub exam_id: String,
    /// Answers in any order.
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    /// Time spent on the attempt; passed through for display only.
    #[serde(default)]
    pub elapsed_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, question_type: QuestionType) -> Question {
        Question {
            id: id.into(),
            text: format!("Question {id}"),
            question_type,
            options: vec![],
            accepted_answers: vec!["a".into()],
            explanation: None,
            wrong_answer_explanations: BTreeMap::new(),
        }
    }

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::ShortAnswer.to_string(), "short_answer");
        assert_eq!(
            "short-answer".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        assert_eq!("Essay".parse::<QuestionType>().unwrap(), QuestionType::Essay);
        assert_eq!("ox".parse::<QuestionType>().unwrap(), QuestionType::TrueFalse);
        assert!("matching".parse::<QuestionType>().is_err());
    }

    #[test]
    fn true_false_is_objective() {
        assert!(QuestionType::TrueFalse.is_objective());
        assert!(QuestionType::Objective.is_objective());
        assert!(!QuestionType::Essay.is_objective());
    }

    #[test]
    fn iter_questions_follows_definition_order() {
        let exam = Exam {
            id: "e".into(),
            title: "E".into(),
            description: String::new(),
            groups: vec![
                QuestionGroup {
                    prompt: Some("Read the passage.".into()),
                    questions: vec![
                        question("q1", QuestionType::Objective),
                        question("q2", QuestionType::Essay),
                    ],
                },
                QuestionGroup {
                    prompt: None,
                    questions: vec![question("q3", QuestionType::ShortAnswer)],
                },
            ],
        };

        let ids: Vec<(QuestionRef, &str)> = exam
            .iter_questions()
            .map(|(at, _, q)| (at, q.id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                (QuestionRef::new(0, 0), "q1"),
                (QuestionRef::new(0, 1), "q2"),
                (QuestionRef::new(1, 0), "q3"),
            ]
        );
        assert_eq!(exam.total_questions(), 3);
        assert_eq!(exam.question(QuestionRef::new(1, 0)).unwrap().id, "q3");
        assert!(exam.question(QuestionRef::new(2, 0)).is_none());
    }

    #[test]
    fn submitted_answer_flattens_ref() {
        let json = r#"{"group": 0, "question": 2, "values": ["1", "3"]}"#;
        let answer: SubmittedAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.question, QuestionRef::new(0, 2));
        assert_eq!(answer.values, vec!["1", "3"]);
    }
}
