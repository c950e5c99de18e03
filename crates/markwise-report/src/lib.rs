//! markwise-report: review sheet rendering for grading reports.
//!
//! Turns a [`markwise_core::report::GradingReport`] into a self-contained
//! HTML review sheet or a Markdown summary.

pub mod html;
pub mod markdown;

#[cfg(test)]
mod test_support;

pub use html::{generate_html, write_html_report};
pub use markdown::{generate_markdown, write_markdown_report};
