//! Grading report types with JSON persistence and attempt comparison.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Exam, QuestionRef};
use crate::recorder::{record_misses, MissRecord};
use crate::results::SubmissionResult;
use crate::statistics::{compute_breakdown, Breakdown};

/// A graded submission together with its miss records.
///
/// The score and the miss records are persisted as one document so a
/// grading pass is never visible partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the exam.
    pub exam: ExamSummary,
    /// Score and per-question verdicts.
    pub result: SubmissionResult,
    /// Review records for every incorrect verdict.
    pub misses: Vec<MissRecord>,
    /// Accuracy by question type and group.
    pub breakdown: Breakdown,
}

/// Summary of an exam (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

impl GradingReport {
    /// Build a report, deriving miss records and the breakdown from the result.
    pub fn new(exam: &Exam, result: SubmissionResult) -> Self {
        let misses = record_misses(exam, &result);
        let breakdown = compute_breakdown(&result);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exam: ExamSummary {
                id: exam.id.clone(),
                title: exam.title.clone(),
                question_count: exam.total_questions(),
            },
            result,
            misses,
            breakdown,
        }
    }

    /// Save the report as JSON.
    ///
    /// Writes to a temporary file in the destination directory and renames
    /// it into place, so readers see either the old file or the whole new one.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this attempt against an earlier one of the same exam.
    pub fn compare(&self, baseline: &GradingReport) -> ProgressReport {
        use std::collections::BTreeMap;

        let outcome = |report: &GradingReport| -> BTreeMap<QuestionRef, (String, bool)> {
            report
                .result
                .verdicts
                .iter()
                .map(|v| (v.question, (v.question_id.clone(), v.is_correct)))
                .collect()
        };

        let before = outcome(baseline);
        let after = outcome(self);

        let mut fixed = Vec::new();
        let mut regressed = Vec::new();
        let mut still_missed = Vec::new();
        let mut unchanged_correct = 0usize;

        for (at, (question_id, now_correct)) in &after {
            let Some((_, was_correct)) = before.get(at) else {
                continue;
            };
            let change = QuestionChange {
                question: *at,
                question_id: question_id.clone(),
            };
            match (was_correct, now_correct) {
                (false, true) => fixed.push(change),
                (true, false) => regressed.push(change),
                (false, false) => still_missed.push(change),
                (true, true) => unchanged_correct += 1,
            }
        }

        let new_questions = after.keys().filter(|k| !before.contains_key(k)).count();
        let removed_questions = before.keys().filter(|k| !after.contains_key(k)).count();

        if baseline.exam.id != self.exam.id {
            tracing::warn!(
                "comparing reports for different exams: '{}' vs '{}'",
                baseline.exam.id,
                self.exam.id
            );
        }

        ProgressReport {
            baseline_score: baseline.result.score,
            current_score: self.result.score,
            score_delta: i16::from(self.result.score) - i16::from(baseline.result.score),
            fixed,
            regressed,
            still_missed,
            unchanged_correct,
            new_questions,
            removed_questions,
        }
    }
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_score: u8,
    pub current_score: u8,
    /// `current_score - baseline_score`.
    pub score_delta: i16,
    /// Questions missed before and correct now.
    pub fixed: Vec<QuestionChange>,
    /// Questions correct before and missed now.
    pub regressed: Vec<QuestionChange>,
    /// Questions missed in both attempts.
    pub still_missed: Vec<QuestionChange>,
    /// Questions correct in both attempts.
    pub unchanged_correct: usize,
    /// Questions in current but not baseline.
    pub new_questions: usize,
    /// Questions in baseline but not current.
    pub removed_questions: usize,
}

/// A question whose outcome is listed in a [`ProgressReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionChange {
    pub question: QuestionRef,
    pub question_id: String,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Score:** {} -> {} ({:+})\n\n",
            self.baseline_score, self.current_score, self.score_delta
        ));
        md.push_str(&format!(
            "**Summary:** {} fixed, {} regressed, {} still missed, {} unchanged\n\n",
            self.fixed.len(),
            self.regressed.len(),
            self.still_missed.len(),
            self.unchanged_correct
        ));

        for (title, changes) in [
            ("Regressed", &self.regressed),
            ("Fixed", &self.fixed),
            ("Still missed", &self.still_missed),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Question | ID |\n");
            md.push_str("|----------|----|\n");
            for c in changes {
                md.push_str(&format!("| {} | {} |\n", c.question, c.question_id));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any question went from correct to incorrect.
    pub fn has_regressions(&self) -> bool {
        !self.regressed.is_empty()
    }
}
