//! Text canonicalization used before comparing answers.

/// Canonicalize a string for strict comparison.
///
/// Lower-cases and deletes every whitespace character, so "학습 능력" and
/// "학습능력" compare equal. Total over all inputs.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonicalize a string for similarity scoring: trim and lower-case only.
///
/// Internal whitespace is kept because the similarity scorer tokenizes on it.
pub fn normalize_loose(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_internal_whitespace() {
        assert_eq!(normalize("학습 능력"), "학습능력");
        assert_eq!(normalize("  Hello\tWorld \n"), "helloworld");
        assert_eq!(normalize(" 산 "), "산");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(normalize_loose("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["", "  A b  C ", "학습 능력", "MiXeD\u{3000}Case", "İstanbul"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn loose_keeps_internal_spaces() {
        assert_eq!(normalize_loose("  Artificial  Intelligence "), "artificial  intelligence");
        assert_ne!(normalize_loose("a b"), normalize("a b"));
    }
}
