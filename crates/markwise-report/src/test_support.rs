use std::collections::BTreeMap;

use markwise_core::model::{
    Exam, Question, QuestionGroup, QuestionRef, QuestionType, Submission, SubmittedAnswer,
};
use markwise_core::report::GradingReport;
use markwise_core::GradingEngine;

/// A graded two-question exam: the objective question is missed, the
/// short-answer question is correct.
pub(crate) fn make_test_report() -> GradingReport {
    let mut remediation = BTreeMap::new();
    remediation.insert("2".to_string(), "크기는 지능의 척도가 아닙니다.".to_string());

    let exam = Exam {
        id: "ai-basics".into(),
        title: "AI Basics".into(),
        description: String::new(),
        groups: vec![QuestionGroup {
            prompt: Some("인공지능에 관한 질문입니다.".into()),
            questions: vec![
                Question {
                    id: "q1".into(),
                    text: "AI의 핵심 특징은?".into(),
                    question_type: QuestionType::Objective,
                    options: vec!["학습 능력".into(), "크기".into(), "가격".into(), "색상".into()],
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
            ],
        }],
    };

    let submission = Submission {
        exam_id: "ai-basics".into(),
        answers: vec![
            SubmittedAnswer {
                question: QuestionRef::new(0, 0),
                values: vec!["2".into()],
            },
            SubmittedAnswer {
                question: QuestionRef::new(0, 1),
                values: vec![" 산".into()],
            },
        ],
        elapsed_secs: 120,
    };

    let result = GradingEngine::default().grade(&exam, &submission);
    GradingReport::new(&exam, result)
}
