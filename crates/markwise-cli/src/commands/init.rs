//! The `markwise init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("markwise.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("exams")?;
    write_if_missing(Path::new("exams/example.toml"), EXAMPLE_EXAM)?;

    std::fs::create_dir_all("submissions")?;
    write_if_missing(Path::new("submissions/example.json"), EXAMPLE_SUBMISSION)?;

    println!("\nNext steps:");
    println!("  1. Edit exams/example.toml or add your own exams");
    println!("  2. Run: markwise validate --exam exams/example.toml");
    println!(
        "  3. Run: markwise grade --exam exams/example.toml --submission submissions/example.json"
    );

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# markwise configuration

# Minimum similarity for a retried short answer to count as correct.
short_answer_threshold = 0.9

# Minimum similarity for a retried essay answer to count as correct.
essay_threshold = 0.7

output_dir = "./markwise-results"
"#;

const EXAMPLE_EXAM: &str = r#"[exam]
id = "example"
title = "Example Exam"
description = "A small exam to get started"

[[groups]]
prompt = "Answer the following questions about Rust."

[[groups.questions]]
id = "ownership"
text = "Which keyword transfers ownership into a closure?"
type = "objective"
options = ["ref", "move", "mut", "static"]
accepted_answers = ["2"]
explanation = "`move` closures take ownership of captured variables."

[groups.questions.wrong_answer_explanations]
"1" = "`ref` is a pattern binding mode, not a closure modifier."

[[groups.questions]]
id = "borrow"
text = "Rust references are checked by the borrow ______."
type = "short_answer"
accepted_answers = ["checker"]

[[groups]]

[[groups.questions]]
id = "unsafe"
text = "Safe Rust code can dereference raw pointers."
type = "true_false"
options = ["True", "False"]
accepted_answers = ["2"]
"#;

const EXAMPLE_SUBMISSION: &str = r#"{
  "exam_id": "example",
  "elapsed_secs": 95,
  "answers": [
    { "group": 0, "question": 0, "values": ["1"] },
    { "group": 0, "question": 1, "values": ["Checker"] },
    { "group": 1, "question": 0, "values": ["2"] }
  ]
}
"#;
