//! Miss records: review snapshots of incorrectly answered questions.

use serde::{Deserialize, Serialize};

use crate::model::{Exam, Question, QuestionRef, QuestionType};
use crate::results::{SubmissionResult, Verdict};

/// Everything a reviewer needs to redisplay a missed question without
/// re-reading the exam definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissRecord {
    pub question: QuestionRef,
    pub question_id: String,
    pub question_text: String,
    /// Shared prompt of the question's group, if any.
    #[serde(default)]
    pub group_prompt: Option<String>,
    pub question_type: QuestionType,
    pub submitted: Vec<String>,
    pub accepted: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Remediation targeted at the specific wrong choice.
    #[serde(default)]
    pub remediation: Option<String>,
}

/// One record per incorrect verdict, in question order.
pub fn record_misses(exam: &Exam, result: &SubmissionResult) -> Vec<MissRecord> {
    result
        .misses()
        .filter_map(|verdict| {
            let Some(question) = exam.question(verdict.question) else {
                tracing::warn!(
                    "verdict for {} has no matching question in exam '{}'",
                    verdict.question,
                    exam.id
                );
                return None;
            };
            let group_prompt = exam
                .groups
                .get(verdict.question.group)
                .and_then(|g| g.prompt.clone());
            Some(miss_record(question, group_prompt, verdict))
        })
        .collect()
}

/// Build a miss record for one verdict.
pub fn miss_record(question: &Question, group_prompt: Option<String>, verdict: &Verdict) -> MissRecord {
    MissRecord {
        question: verdict.question,
        question_id: question.id.clone(),
        question_text: question.text.clone(),
        group_prompt,
        question_type: question.question_type,
        submitted: verdict.submitted.clone(),
        accepted: verdict.accepted.clone(),
        explanation: question.explanation.clone(),
        remediation: remediation_for(question, &verdict.submitted),
    }
}

fn remediation_for(question: &Question, submitted: &[String]) -> Option<String> {
    submitted
        .iter()
        .find_map(|value| question.wrong_answer_explanations.get(value.trim()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GradingEngine;
    use crate::model::{QuestionGroup, Submission, SubmittedAnswer};
    use std::collections::BTreeMap;

    fn exam() -> Exam {
        let mut remediation = BTreeMap::new();
        remediation.insert("2".to_string(), "크기는 지능의 척도가 아닙니다.".to_string());
        remediation.insert("4".to_string(), "색상은 관련이 없습니다.".to_string());

        Exam {
            id: "ai".into(),
            title: "AI".into(),
            description: String::new(),
            groups: vec![QuestionGroup {
                prompt: Some("인공지능에 관한 질문입니다.".into()),
                questions: vec![
                    Question {
                        id: "q1".into(),
                        text: "AI의 핵심 특징은?".into(),
                        question_type: QuestionType::Objective,
                        options: vec![
                            "학습 능력".into(),
                            "크기".into(),
                            "가격".into(),
                            "색상".into(),
                        ],
                        accepted_answers: vec!["1".into()],
                        explanation: Some("AI는 데이터로부터 학습합니다.".into()),
                        wrong_answer_explanations: remediation,
                    },
                    Question {
                        id: "q2".into(),
                        text: "한국에서 가장 높은 것은?".into(),
                        question_type: QuestionType::ShortAnswer,
                        options: vec![],
                        accepted_answers: vec!["산".into()],
                        explanation: None,
                        wrong_answer_explanations: BTreeMap::new(),
                    },
                    Question {
                        id: "q3".into(),
                        text: "빈칸을 채우시오.".into(),
                        question_type: QuestionType::ShortAnswer,
                        options: vec![],
                        accepted_answers: vec!["표준설".into(), "과실".into()],
                        explanation: Some("두 빈칸 모두 맞아야 합니다.".into()),
                        wrong_answer_explanations: BTreeMap::new(),
                    },
                ],
            }],
        }
    }

    fn grade(answers: &[(usize, &str)]) -> (Exam, SubmissionResult) {
        let exam = exam();
        let submission = Submission {
            exam_id: "ai".into(),
            answers: answers
                .iter()
                .map(|(q, value)| SubmittedAnswer {
                    question: QuestionRef::new(0, *q),
                    values: vec![value.to_string()],
                })
                .collect(),
            elapsed_secs: 0,
        };
        let result = GradingEngine::default().grade(&exam, &submission);
        (exam, result)
    }

    #[test]
    fn records_only_misses_in_order() {
        let (exam, result) = grade(&[(0, "2"), (1, "산"), (2, "표준설, 실수")]);
        let misses = record_misses(&exam, &result);
        let ids: Vec<&str> = misses.iter().map(|m| m.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q3"]);
    }

    #[test]
    fn carries_context_and_remediation() {
        let (exam, result) = grade(&[(0, "2")]);
        let misses = record_misses(&exam, &result);
        let first = &misses[0];
        assert_eq!(first.question_text, "AI의 핵심 특징은?");
        assert_eq!(first.group_prompt.as_deref(), Some("인공지능에 관한 질문입니다."));
        assert_eq!(first.submitted, vec!["2"]);
        assert_eq!(first.accepted, vec!["1"]);
        assert_eq!(first.explanation.as_deref(), Some("AI는 데이터로부터 학습합니다."));
        assert_eq!(first.remediation.as_deref(), Some("크기는 지능의 척도가 아닙니다."));
    }

    #[test]
    fn no_remediation_without_matching_key() {
        let (exam, result) = grade(&[(0, "3")]);
        let misses = record_misses(&exam, &result);
        assert!(misses[0].remediation.is_none());
    }

    #[test]
    fn unanswered_questions_are_recorded() {
        let (exam, result) = grade(&[]);
        let misses = record_misses(&exam, &result);
        assert_eq!(misses.len(), 3);
        assert!(misses.iter().all(|m| m.submitted.is_empty()));
    }

    #[test]
    fn perfect_submission_has_no_misses() {
        let (exam, result) = grade(&[(0, "1"), (1, "산"), (2, "표준설,과실")]);
        assert!(record_misses(&exam, &result).is_empty());
    }
}
