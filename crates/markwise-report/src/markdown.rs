//! Markdown review summary, suitable for pasting into an issue or chat.

use anyhow::{Context, Result};
use std::path::Path;

use markwise_core::report::GradingReport;

/// Escape characters that would break a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn values(values: &[String]) -> String {
    if values.is_empty() {
        "_(no answer)_".to_string()
    } else {
        cell(&values.join(", "))
    }
}

/// Generate a Markdown summary of a grading report.
pub fn generate_markdown(report: &GradingReport) -> String {
    let result = &report.result;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.exam.title));
    md.push_str(&format!(
        "**Score:** {}/100 ({} of {} correct, {}s)\n\n",
        result.score, result.correct_count, result.total_questions, result.elapsed_secs
    ));

    if !report.breakdown.per_type.is_empty() {
        md.push_str("| Type | Correct | Accuracy |\n");
        md.push_str("|------|---------|----------|\n");
        for (question_type, stats) in &report.breakdown.per_type {
            md.push_str(&format!(
                "| {} | {}/{} | {:.1}% |\n",
                question_type,
                stats.correct,
                stats.total,
                stats.accuracy * 100.0
            ));
        }
        md.push('\n');
    }

    if report.misses.is_empty() {
        md.push_str("All answers correct.\n");
        return md;
    }

    md.push_str("## Review\n\n");
    for miss in &report.misses {
        md.push_str(&format!("### {}. {}\n\n", miss.question, miss.question_text.trim()));
        md.push_str(&format!("- Your answer: {}\n", values(&miss.submitted)));
        md.push_str(&format!("- Accepted: {}\n", values(&miss.accepted)));
        if let Some(remediation) = &miss.remediation {
            md.push_str(&format!("- Hint: {}\n", remediation.trim()));
        }
        if let Some(explanation) = &miss.explanation {
            md.push_str(&format!("\n> {}\n", explanation.trim().replace('\n', "\n> ")));
        }
        md.push('\n');
    }

    md
}

/// Write a Markdown summary to a file.
pub fn write_markdown_report(report: &GradingReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(report))
        .with_context(|| format!("failed to write markdown to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_test_report;

    #[test]
    fn markdown_lists_misses_with_hints() {
        let md = generate_markdown(&make_test_report());
        assert!(md.starts_with("# AI Basics"));
        assert!(md.contains("**Score:** 50/100 (1 of 2 correct, 120s)"));
        assert!(md.contains("### 1-1. AI의 핵심 특징은?"));
        assert!(md.contains("- Your answer: 2"));
        assert!(md.contains("- Hint: 크기는 지능의 척도가 아닙니다."));
        assert!(md.contains("> AI는 데이터로부터 학습합니다."));
        assert!(!md.contains("한국에서 가장 높은 것은?"));
    }

    #[test]
    fn perfect_score_has_no_review_section() {
        let mut report = make_test_report();
        report.misses.clear();
        let md = generate_markdown(&report);
        assert!(md.contains("All answers correct."));
        assert!(!md.contains("## Review"));
    }

    #[test]
    fn table_cells_escape_pipes() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }
}
