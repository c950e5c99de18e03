//! The `markwise retry` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use markwise_core::config::load_config_from;
use markwise_core::parser::parse_exam;
use markwise_core::similarity::best_similarity;
use markwise_core::{GradingEngine, QuestionRef};

pub fn execute(
    exam_path: PathBuf,
    group: usize,
    question: usize,
    answer: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if group == 0 || question == 0 {
        bail!("group and question numbers start at 1");
    }

    let config = load_config_from(config_path.as_deref())?;
    let exam = parse_exam(&exam_path)?;

    let at = QuestionRef::new(group - 1, question - 1);
    let engine = GradingEngine::new(&config);
    let verdict = engine.retry(&exam, at, &answer)?;

    println!("Question {}: {}", verdict.question, verdict.question_type);
    println!("  Your answer: {}", verdict.submitted.join(", "));
    if !verdict.question_type.is_objective() {
        println!(
            "  Similarity:  {:.2}",
            best_similarity(&answer, &verdict.accepted)
        );
    }

    if verdict.is_correct {
        println!("Correct");
    } else {
        println!("Incorrect");
        println!("  Accepted: {}", verdict.accepted.join(" | "));
    }

    Ok(())
}
