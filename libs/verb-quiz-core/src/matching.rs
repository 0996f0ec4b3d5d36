//! Answer grading: exact match, single-edit typo, or wrong.

use crate::types::{AnswerClassification, Answers};

/// Normalize raw user input before grading.
///
/// Only case is folded. Whitespace is kept, so a stray trailing space counts
/// as one edit and grades as a typo rather than a correct answer.
pub fn normalize_answer(raw: &str) -> String {
    raw.to_lowercase()
}

/// Classify a normalized submission against the accepted variants.
///
/// Exact matches are checked across every variant before any typo check, so a
/// submission that is exact for one variant and one edit off another is
/// always correct.
pub fn classify_answer(submission: &str, accepted: &Answers) -> AnswerClassification {
    if is_correct_answer(submission, accepted) {
        AnswerClassification::Correct
    } else if is_typo_answer(submission, accepted) {
        AnswerClassification::Typo
    } else {
        AnswerClassification::Incorrect
    }
}

/// Whether the submission equals any accepted variant.
pub fn is_correct_answer(submission: &str, accepted: &Answers) -> bool {
    accepted.iter().any(|answer| answer == submission)
}

/// Whether the submission is exactly one edit away from any accepted variant.
pub fn is_typo_answer(submission: &str, accepted: &Answers) -> bool {
    accepted
        .iter()
        .any(|answer| levenshtein_distance(submission, answer) == 1)
}

/// Calculate Levenshtein distance between two strings.
///
/// Works on `char`s, so `å`, `ø` and `æ` each count as a single character.
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

    // Two rows instead of the full matrix
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

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(variants: &[&str]) -> Answers {
        Answers::new(variants.iter().map(|v| v.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_levenshtein_empty_side_is_length() {
        for s in ["a", "bli", "forstått", "interesserte"] {
            let len = s.chars().count();
            assert_eq!(levenshtein_distance("", s), len);
            assert_eq!(levenshtein_distance(s, ""), len);
            assert_eq!(levenshtein_distance(s, s), 0);
        }
    }

    #[test]
    fn test_levenshtein_symmetric() {
        let pairs = [
            ("arbeide", "arbeid"),
            ("ble", "blei"),
            ("gjaldt", "galdt"),
            ("xyz", "komme"),
            ("dø", "dødde"),
        ];
        for (a, b) in pairs {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        }
    }

    #[test]
    fn test_levenshtein_counts_norwegian_letters_once() {
        assert_eq!(levenshtein_distance("gå", "ga"), 1);
        assert_eq!(levenshtein_distance("søke", "soke"), 1);
        assert_eq!(levenshtein_distance("bære", "bare"), 1);
    }

    #[test]
    fn test_classify_exact() {
        assert_eq!(classify_answer("kom", &answers(&["kom"])), AnswerClassification::Correct);
        assert_ne!(classify_answer("komme", &answers(&["kom"])), AnswerClassification::Correct);
    }

    #[test]
    fn test_classify_typo() {
        assert_eq!(classify_answer("kom ", &answers(&["kom"])), AnswerClassification::Typo);
        assert_eq!(classify_answer("arbeid", &answers(&["arbeide"])), AnswerClassification::Typo);
        assert_eq!(classify_answer("arbiede", &answers(&["arbeide"])), AnswerClassification::Incorrect);
    }

    #[test]
    fn test_classify_incorrect() {
        assert_eq!(classify_answer("xyz", &answers(&["arbeide"])), AnswerClassification::Incorrect);
        assert_eq!(classify_answer("", &answers(&["arbeide"])), AnswerClassification::Incorrect);
    }

    #[test]
    fn test_classify_multiple_variants() {
        let past = answers(&["ble", "blei"]);
        assert_eq!(classify_answer("ble", &past), AnswerClassification::Correct);
        assert_eq!(classify_answer("blei", &past), AnswerClassification::Correct);
        assert_eq!(classify_answer("bleii", &past), AnswerClassification::Typo);

        let perfect = answers(&["laget", "laga", "lagd"]);
        assert_eq!(classify_answer("lagd", &perfect), AnswerClassification::Correct);
        assert_eq!(classify_answer("lagt", &perfect), AnswerClassification::Typo);
    }

    #[test]
    fn test_exact_match_wins_over_typo() {
        // "ble" is one edit from "blei" but exact for "ble"
        let past = answers(&["blei", "ble"]);
        assert_eq!(classify_answer("ble", &past), AnswerClassification::Correct);
    }

    #[test]
    fn test_normalize_folds_case_only() {
        assert_eq!(normalize_answer("ArBeIdE"), "arbeide");
        assert_eq!(normalize_answer("GÅTT"), "gått");
        assert_eq!(normalize_answer("kom "), "kom ");
    }
}
