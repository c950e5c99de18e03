//! Token-overlap similarity used by the fuzzy (retry/review) matcher.
//!
//! Scores fall in `[0, 1]` and are never persisted; they only drive a
//! threshold decision.

use crate::normalize::normalize_loose;

/// Score assigned when one answer contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.7;

/// Similarity between a candidate answer and one accepted answer.
///
/// Both sides are trimmed and lower-cased, then scored by the first rule
/// that applies:
/// 1. identical strings score `1.0`;
/// 2. one containing the other scores [`CONTAINMENT_SCORE`];
/// 3. otherwise the fraction of candidate tokens found among the accepted
///    tokens, divided by the larger token count;
/// 4. no shared tokens scores `0.0`.
///
/// A blank candidate scores `0.0` against a non-blank answer.
pub fn similarity(candidate: &str, accepted: &str) -> f64 {
    let a = normalize_loose(candidate);
    let b = normalize_loose(accepted);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return CONTAINMENT_SCORE;
    }

    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();
    let shared = tokens_a.iter().filter(|t| tokens_b.contains(*t)).count();
    if shared == 0 {
        return 0.0;
    }

    shared as f64 / tokens_a.len().max(tokens_b.len()) as f64
}

/// Highest similarity between a candidate and any accepted answer.
pub fn best_similarity(candidate: &str, accepted: &[String]) -> f64 {
    accepted
        .iter()
        .map(|answer| similarity(candidate, answer))
        .fold(0.0, f64::max)
}
