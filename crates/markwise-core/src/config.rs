//! Grading configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ExamError;

/// Top-level markwise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Minimum similarity for a short-answer retry to count as correct.
    #[serde(default = "default_short_answer_threshold")]
    pub short_answer_threshold: f64,
    /// Minimum similarity for an essay retry to count as correct.
    #[serde(default = "default_essay_threshold")]
    pub essay_threshold: f64,
    /// Output directory for grading reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_short_answer_threshold() -> f64 {
    0.9
}
fn default_essay_threshold() -> f64 {
    0.7
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./markwise-results")
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            short_answer_threshold: default_short_answer_threshold(),
            essay_threshold: default_essay_threshold(),
            output_dir: default_output_dir(),
        }
    }
}

impl GradingConfig {
    /// Check that both thresholds lie within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ExamError> {
        for (name, value) in [
            ("short_answer_threshold", self.short_answer_threshold),
            ("essay_threshold", self.essay_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ExamError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `markwise.toml` in the current directory
/// 2. `~/.config/markwise/config.toml`
///
/// Environment variable overrides: `MARKWISE_SHORT_ANSWER_THRESHOLD`,
/// `MARKWISE_ESSAY_THRESHOLD`.
pub fn load_config() -> Result<GradingConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradingConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("markwise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradingConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<GradingConfig> {
    Ok(toml::from_str::<GradingConfig>(content)?)
}

fn apply_env_overrides(config: &mut GradingConfig) -> Result<()> {
    if let Some(value) = env_threshold("MARKWISE_SHORT_ANSWER_THRESHOLD")? {
        config.short_answer_threshold = value;
    }
    if let Some(value) = env_threshold("MARKWISE_ESSAY_THRESHOLD")? {
        config.essay_threshold = value;
    }
    Ok(())
}

fn env_threshold(var: &str) -> Result<Option<f64>> {
    match std::env::var(var) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{var} is not a number: '{raw}'"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("markwise"))
}
