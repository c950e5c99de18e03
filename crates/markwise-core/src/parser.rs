//! Exam definition and submission parsing.
//!
//! Exams are loaded from TOML files and validated; submissions are JSON
//! payloads whose shape is checked here, before the engine ever sees them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ExamError;
use crate::model::{Exam, Question, QuestionGroup, QuestionRef, QuestionType, Submission, SubmittedAnswer};

/// Intermediate TOML structure for parsing exam files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    groups: Vec<TomlGroup>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlGroup {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    accepted_answers: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    wrong_answer_explanations: BTreeMap<String, String>,
}

/// Parse a single TOML file into an `Exam`.
pub fn parse_exam(path: &Path) -> Result<Exam> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    parse_exam_str(&content, path)
}

/// Parse a TOML string into an `Exam` (useful for testing).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<Exam> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let groups = parsed
        .groups
        .into_iter()
        .map(|g| {
            let questions = g
                .questions
                .into_iter()
                .map(|q| {
                    let question_type: QuestionType = q
                        .question_type
                        .parse()
                        .with_context(|| format!("question '{}'", q.id))?;
                    // Option numbers are compared verbatim when grading.
                    let (accepted_answers, wrong_answer_explanations): (
                        Vec<String>,
                        BTreeMap<String, String>,
                    ) = if question_type.is_objective() {
                        (
                            q.accepted_answers
                                .iter()
                                .map(|a| a.trim().to_string())
                                .collect(),
                            q.wrong_answer_explanations
                                .into_iter()
                                .map(|(key, text)| (key.trim().to_string(), text))
                                .collect(),
                        )
                    } else {
                        (q.accepted_answers, q.wrong_answer_explanations)
                    };
                    Ok(Question {
                        id: q.id,
                        text: q.text,
                        question_type,
                        options: q.options,
                        accepted_answers,
                        explanation: q.explanation,
                        wrong_answer_explanations,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(QuestionGroup {
                prompt: g.prompt,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Exam {
        id: parsed.exam.id,
        title: parsed.exam.title,
        description: parsed.exam.description,
        groups,
    })
}

/// Recursively load all `.toml` exam files from a directory.
pub fn load_exam_directory(dir: &Path) -> Result<Vec<Exam>> {
    let mut exams = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            exams.extend(load_exam_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exam(&path) {
                Ok(exam) => exams.push(exam),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(exams)
}

/// A warning from exam validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate an exam for common authoring issues.
pub fn validate_exam(exam: &Exam) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (index, group) in exam.groups.iter().enumerate() {
        if group.questions.is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("group {} has no questions", index + 1),
            });
        }
    }

    let mut seen_ids = HashSet::new();
    for (_, _, question) in exam.iter_questions() {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::question(
                question,
                format!("duplicate question ID: {}", question.id),
            ));
        }

        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(question, "question text is empty"));
        }

        if question.accepted_answers.is_empty() {
            warnings.push(ValidationWarning::question(
                question,
                "no accepted answers; this question can never be graded correct",
            ));
        }

        if question.question_type.is_objective() {
            warnings.extend(validate_choices(question));
        } else if !question.options.is_empty() {
            warnings.push(ValidationWarning::question(
                question,
                format!("options are ignored for {} questions", question.question_type),
            ));
        }
    }

    warnings
}

fn validate_choices(question: &Question) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let option_count = question.options.len();

    if option_count < 2 {
        warnings.push(ValidationWarning::question(
            question,
            format!("objective question needs at least 2 options, found {option_count}"),
        ));
    }
    if question.question_type == QuestionType::TrueFalse && option_count != 2 {
        warnings.push(ValidationWarning::question(
            question,
            format!("true/false question should have exactly 2 options, found {option_count}"),
        ));
    }

    let is_option_index = |s: &str| {
        s.trim()
            .parse::<usize>()
            .is_ok_and(|i| (1..=option_count).contains(&i))
    };

    for answer in &question.accepted_answers {
        if !is_option_index(answer) {
            warnings.push(ValidationWarning::question(
                question,
                format!("accepted answer '{answer}' is not an option number (1-{option_count})"),
            ));
        }
    }
    for key in question.wrong_answer_explanations.keys() {
        if !is_option_index(key) {
            warnings.push(ValidationWarning::question(
                question,
                format!("remediation key '{key}' is not an option number"),
            ));
        } else if question.accepted_answers.iter().any(|a| a.trim() == key.trim()) {
            warnings.push(ValidationWarning::question(
                question,
                format!("remediation key '{key}' is a correct answer and will never be shown"),
            ));
        }
    }

    warnings
}

/// Wire shape of a submission, checked before conversion.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSubmission {
    exam_id: String,
    answers: Vec<RawAnswer>,
    #[serde(default)]
    elapsed_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    group: usize,
    question: usize,
    values: RawValues,
}

/// A single string is accepted in place of a one-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValues {
    One(String),
    Many(Vec<String>),
}

/// Parse a JSON submission file.
pub fn parse_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission file: {}", path.display()))?;
    parse_submission_str(&content)
        .with_context(|| format!("invalid submission: {}", path.display()))
}

/// Parse and shape-check a JSON submission.
pub fn parse_submission_str(content: &str) -> Result<Submission, ExamError> {
    let raw: RawSubmission = serde_json::from_str(content)
        .map_err(|e| ExamError::MalformedSubmission(e.to_string()))?;

    let answers = raw
        .answers
        .into_iter()
        .map(|a| SubmittedAnswer {
            question: QuestionRef::new(a.group, a.question),
            values: match a.values {
                RawValues::One(value) => vec![value],
                RawValues::Many(values) => values,
            },
        })
        .collect();

    Ok(Submission {
        exam_id: raw.exam_id,
        answers,
        elapsed_secs: raw.elapsed_secs,
    })
}
