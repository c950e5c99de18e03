//! markwise-core: answer-grading engine, data model and scoring.
//!
//! This crate decides whether submitted answers to objective, short-answer
//! and essay questions are correct, folds the decisions into a score, and
//! shapes the result into review records ready for persistence.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod recorder;
pub mod report;
pub mod results;
pub mod similarity;
pub mod splitter;
pub mod statistics;

pub use config::{load_config, load_config_from, GradingConfig};
pub use engine::GradingEngine;
pub use error::ExamError;
pub use matcher::{AnswerMatcher, ExactMatcher, FuzzyMatcher, GradingMode, StrictMatcher};
pub use model::{Exam, Question, QuestionGroup, QuestionRef, QuestionType, Submission, SubmittedAnswer};
pub use recorder::MissRecord;
pub use report::GradingReport;
pub use results::{SubmissionResult, Verdict};
