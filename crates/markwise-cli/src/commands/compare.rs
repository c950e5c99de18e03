//! The `markwise compare` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_core::report::GradingReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = GradingReport::load_json(&baseline_path)?;
    let current = GradingReport::load_json(&current_path)?;

    let progress = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", progress.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        _ => {
            println!(
                "Score: {} -> {} ({:+})",
                progress.baseline_score, progress.current_score, progress.score_delta
            );
            println!(
                "Comparison: {} fixed, {} regressed, {} still missed, {} unchanged",
                progress.fixed.len(),
                progress.regressed.len(),
                progress.still_missed.len(),
                progress.unchanged_correct
            );

            for (title, changes) in [
                ("Regressed", &progress.regressed),
                ("Fixed", &progress.fixed),
                ("Still missed", &progress.still_missed),
            ] {
                if changes.is_empty() {
                    continue;
                }
                println!("\n{title}:");
                for c in changes {
                    println!("  {} ({})", c.question, c.question_id);
                }
            }

            if progress.new_questions > 0 {
                println!("\n{} new question(s)", progress.new_questions);
            }
            if progress.removed_questions > 0 {
                println!("{} removed question(s)", progress.removed_questions);
            }
        }
    }

    if fail_on_regression && progress.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
