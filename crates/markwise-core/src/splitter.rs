//! Multi-blank answer splitting.
//!
//! A question with several accepted answers may receive them as one
//! comma-joined string. Splitting is a heuristic: [`try_split`] either
//! returns a positional pairing or `None`, and callers fall back to
//! comparing the whole string.

/// Delimiter between blanks in a single submitted value.
pub const BLANK_DELIMITER: char = ',';

/// A submitted value decomposed into one piece per accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankPairing<'a> {
    pairs: Vec<(String, &'a str)>,
}

impl<'a> BlankPairing<'a> {
    /// `(submitted piece, accepted answer)` pairs in blank order.
    pub fn pairs(&self) -> &[(String, &'a str)] {
        &self.pairs
    }

    /// Returns `true` if every pair satisfies `eq`.
    pub fn all(&self, mut eq: impl FnMut(&str, &str) -> bool) -> bool {
        self.pairs.iter().all(|(piece, accepted)| eq(piece, accepted))
    }
}

/// Try to split a single submitted value into one piece per accepted answer.
///
/// Applies only when more than one answer is accepted and exactly one value
/// was submitted. Pieces are trimmed and empty pieces dropped; the split is
/// accepted only if the piece count equals the accepted-answer count.
pub fn try_split<'a>(values: &[String], accepted: &'a [String]) -> Option<BlankPairing<'a>> {
    if accepted.len() <= 1 {
        return None;
    }
    let [value] = values else {
        return None;
    };

    let pieces: Vec<String> = value
        .split(BLANK_DELIMITER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if pieces.len() != accepted.len() {
        tracing::debug!(
            pieces = pieces.len(),
            expected = accepted.len(),
            "blank count mismatch, comparing whole answer"
        );
        return None;
    }

    Some(BlankPairing {
        pairs: pieces
            .into_iter()
            .zip(accepted.iter().map(String::as_str))
            .collect(),
    })
}
