//! HTML review sheet generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use markwise_core::report::GradingReport;
use markwise_core::statistics::TypeStats;

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn join_values(values: &[String]) -> String {
    if values.is_empty() {
        "(no answer)".to_string()
    } else {
        html_escape(&values.join(" | "))
    }
}

/// Generate an HTML review sheet from a grading report.
pub fn generate_html(report: &GradingReport) -> String {
    let mut html = String::new();
    let result = &report.result;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>markwise review: {}</title>\n",
        html_escape(&report.exam.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>markwise review</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Exam: <strong>{}</strong> | {} questions | {}s elapsed | {}</p>\n",
        html_escape(&report.exam.title),
        report.exam.question_count,
        result.elapsed_secs,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Score</h2>\n");
    html.push_str(&format!(
        "<p class=\"score {}\">{} <span>/ 100</span></p>\n",
        score_class(result.score),
        result.score
    ));
    html.push_str(&format!(
        "<p>{} of {} correct</p>\n",
        result.correct_count, result.total_questions
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Type</th><th>Correct</th><th>Accuracy</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (question_type, stats) in &report.breakdown.per_type {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}/{}</td><td>{:.1}%</td></tr>\n",
            question_type,
            stats.correct,
            stats.total,
            stats.accuracy * 100.0,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.breakdown.per_group.is_empty() {
        html.push_str(&generate_bar_chart(&report.breakdown.per_group));
    }

    html.push_str("</section>\n");

    // Per-question verdicts
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">No.</th><th onclick=\"sortTable(1)\">Type</th><th onclick=\"sortTable(2)\">Submitted</th><th onclick=\"sortTable(3)\">Accepted</th><th onclick=\"sortTable(4)\">Result</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for v in &result.verdicts {
        let class = if v.is_correct { "pass" } else { "fail" };
        let text = if v.is_correct { "O" } else { "X" };

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            class,
            v.question,
            v.question_type,
            join_values(&v.submitted),
            join_values(&v.accepted),
            class,
            text
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Review cards for missed questions
    if !report.misses.is_empty() {
        html.push_str("<section class=\"review\">\n");
        html.push_str("<h2>Review</h2>\n");
        for miss in &report.misses {
            html.push_str("<article class=\"miss\">\n");
            if let Some(prompt) = &miss.group_prompt {
                html.push_str(&format!("<blockquote>{}</blockquote>\n", html_escape(prompt)));
            }
            html.push_str(&format!(
                "<h3>{}. {}</h3>\n",
                miss.question,
                html_escape(&miss.question_text)
            ));
            html.push_str(&format!(
                "<p>Your answer: <code>{}</code></p>\n<p>Accepted: <code>{}</code></p>\n",
                join_values(&miss.submitted),
                join_values(&miss.accepted)
            ));
            if let Some(remediation) = &miss.remediation {
                html.push_str(&format!(
                    "<p class=\"remediation\">{}</p>\n",
                    html_escape(remediation)
                ));
            }
            if let Some(explanation) = &miss.explanation {
                html.push_str(&format!(
                    "<details><summary>Explanation</summary><p>{}</p></details>\n",
                    html_escape(explanation)
                ));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML review sheet to a file.
pub fn write_html_report(report: &GradingReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn score_class(score: u8) -> &'static str {
    if score >= 80 {
        "good"
    } else if score >= 50 {
        "fair"
    } else {
        "poor"
    }
}

fn generate_bar_chart(per_group: &std::collections::BTreeMap<usize, TypeStats>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = per_group.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (group, stats)) in per_group.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (stats.accuracy * max_width as f64) as usize;

        let color = if stats.accuracy >= 0.8 {
            "#22c55e"
        } else if stats.accuracy >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Group {}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            group + 1
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            stats.accuracy * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans KR', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 3rem; font-weight: bold; margin: 0.5rem 0; }
.score span { font-size: 1.2rem; color: #6b7280; }
.good { color: #16a34a; } .fair { color: #ca8a04; } .poor { color: #dc2626; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.miss { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.remediation { border-left: 4px solid #f59e0b; padding-left: 0.75rem; }
blockquote { margin: 0 0 0.5rem; color: #6b7280; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_test_report;

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("AI Basics"));
        assert!(html.contains("50 <span>/ 100</span>"));
        assert!(html.contains("short_answer"));
        assert!(html.contains("크기는 지능의 척도가 아닙니다."));
        assert!(html.contains("Group 1"));
    }

    #[test]
    fn html_escapes_user_content() {
        let mut report = make_test_report();
        report.misses[0].question_text = "<script>alert(1)</script>".into();
        let html = generate_html(&report);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
