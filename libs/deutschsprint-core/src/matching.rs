//! Answer matching for typed quiz answers.

use serde::{Deserialize, Serialize};

/// Default maximum number of typos accepted in a typed answer.
pub const DEFAULT_TOLERANCE: usize = 2;

/// Fraction of the reference length that may be edited.
const LENGTH_RATIO: f64 = 0.2;

/// Result of grading a typed answer against the reference answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is accepted.
    pub is_correct: bool,
    /// Edit distance between the normalized strings.
    pub distance: usize,
    /// Largest distance that would still have been accepted.
    pub max_allowed: usize,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized reference answer (for display).
    pub correct_normalized: String,
}

/// Grade a typed answer, tolerating up to `min(tolerance, 20% of the
/// reference length)` edits after trimming and lowercasing.
pub fn grade_answer(typed: &str, correct: &str, tolerance: usize) -> MatchResult {
    let typed_normalized = normalize(typed);
    let correct_normalized = normalize(correct);
    let max_allowed = max_allowed_distance(&correct_normalized, tolerance);

    if typed_normalized == correct_normalized {
        return MatchResult {
            is_correct: true,
            distance: 0,
            max_allowed,
            typed_normalized,
            correct_normalized,
        };
    }

    let distance = levenshtein_distance(&typed_normalized, &correct_normalized);
    MatchResult {
        is_correct: distance <= max_allowed,
        distance,
        max_allowed,
        typed_normalized,
        correct_normalized,
    }
}

/// Whether `typed` is close enough to `correct`.
pub fn is_acceptable(typed: &str, correct: &str, tolerance: usize) -> bool {
    grade_answer(typed, correct, tolerance).is_correct
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn max_allowed_distance(reference: &str, tolerance: usize) -> usize {
    let by_length = (reference.chars().count() as f64 * LENGTH_RATIO).floor() as usize;
    tolerance.min(by_length)
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Spell out umlauts and sharp s for keyboards without them.
pub fn fold_german(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("cat", "hat"), 1);
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
    }

    #[test]
    fn test_levenshtein_is_case_sensitive() {
        assert_eq!(levenshtein_distance("Hello", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_symmetry_and_triangle() {
        let words = ["", "a", "zwei", "zwölf", "Straße", "strasse", "kitten", "sitting"];
        for a in words {
            assert_eq!(levenshtein_distance(a, a), 0);
            for b in words {
                let ab = levenshtein_distance(a, b);
                assert_eq!(ab, levenshtein_distance(b, a));
                for c in words {
                    assert!(ab <= levenshtein_distance(a, c) + levenshtein_distance(c, b));
                }
            }
        }
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("fünf", "funf"), 1);
    }

    #[test]
    fn test_accept_exact() {
        assert!(is_acceptable("hello", "hello", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_accept_case_and_whitespace() {
        assert!(is_acceptable(" Hello ", "hello", DEFAULT_TOLERANCE));
        assert!(is_acceptable("HELLO", "hello", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_accept_small_typo() {
        assert!(is_acceptable("helo", "hello", DEFAULT_TOLERANCE));
        assert!(is_acceptable("hell", "hello", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_reject_too_different() {
        assert!(!is_acceptable("goodbye", "hello", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_short_references_need_exact_match() {
        // floor(3 * 0.2) == 0
        assert!(!is_acceptable("hat", "cat", DEFAULT_TOLERANCE));
        assert!(is_acceptable("Cat ", "cat", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_empty_reference() {
        assert!(is_acceptable("", "", DEFAULT_TOLERANCE));
        assert!(is_acceptable("   ", "", DEFAULT_TOLERANCE));
        assert!(!is_acceptable("a", "", DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_long_reference_capped_by_tolerance() {
        let reference = "how are you (informal)";
        let result = grade_answer("hw ar yu (informal)", reference, DEFAULT_TOLERANCE);
        assert_eq!(result.max_allowed, 2);
        assert_eq!(result.distance, 3);
        assert!(!result.is_correct);

        assert!(is_acceptable("how are you (informal)", reference, 0));
        assert!(is_acceptable("how are you (informl)", reference, 1));
    }

    #[test]
    fn test_grade_reports_normalized_strings() {
        let result = grade_answer("  Good Mornin ", "Good morning", DEFAULT_TOLERANCE);
        assert!(result.is_correct);
        assert_eq!(result.typed_normalized, "good mornin");
        assert_eq!(result.correct_normalized, "good morning");
        assert_eq!(result.distance, 1);
        assert_eq!(result.max_allowed, 2);
    }

    #[test]
    fn test_fold_german() {
        assert_eq!(fold_german("Grüße aus Köln"), "Gruesse aus Koeln");
        assert_eq!(fold_german("Ärger Übung Öl"), "Aerger Uebung Oel");
        assert_eq!(fold_german("plain"), "plain");
    }
}
