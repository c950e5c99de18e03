//! The `markwise grade` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_core::config::load_config_from;
use markwise_core::parser::{parse_exam, parse_submission};
use markwise_core::report::GradingReport;
use markwise_core::GradingEngine;
use markwise_report::html::write_html_report;
use markwise_report::markdown::write_markdown_report;

pub fn execute(
    exam_path: PathBuf,
    submission_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    no_save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let exam = parse_exam(&exam_path)?;
    let submission = parse_submission(&submission_path)?;

    let engine = GradingEngine::new(&config);
    let result = engine.grade(&exam, &submission);
    let report = GradingReport::new(&exam, result);

    print_summary(&report);

    if no_save {
        return Ok(());
    }

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let stem = format!("{}-{timestamp}", report.exam.id);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "md"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    tracing::debug!(?formats, dir = %output.display(), "writing reports");

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{stem}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML review: {}", path.display());
            }
            "md" | "markdown" => {
                let path = output.join(format!("{stem}.md"));
                write_markdown_report(&report, &path)?;
                eprintln!("Markdown review: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let result = &report.result;

    let mut table = Table::new();
    table.set_header(vec!["No.", "Type", "Submitted", "Accepted", "Result"]);

    for v in &result.verdicts {
        let submitted = if v.submitted.is_empty() {
            "-".to_string()
        } else {
            v.submitted.join(" | ")
        };
        table.add_row(vec![
            Cell::new(v.question),
            Cell::new(v.question_type),
            Cell::new(submitted),
            Cell::new(v.accepted.join(" | ")),
            Cell::new(if v.is_correct { "O" } else { "X" }),
        ]);
    }

    println!("{}", report.exam.title);
    println!("{table}");
    println!(
        "Score: {}/100 ({} of {} correct)",
        result.score, result.correct_count, result.total_questions
    );

    for miss in &report.misses {
        if let Some(remediation) = &miss.remediation {
            println!("  [{}] {}", miss.question, remediation);
        }
    }
}
