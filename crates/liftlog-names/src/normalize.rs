//! Canonical comparison keys for exercise names

use unicode_normalization::UnicodeNormalization;

/// Whole-word articles dropped from canonical keys
const ARTICLES: [&str; 3] = ["the", "a", "an"];

/// Normalize a name into its canonical comparison key
///
/// - Composes to NFC so decomposed accents compare equal to precomposed ones
/// - Converts to lowercase (codepoint mapping, not locale-aware)
/// - Removes everything that is not a letter, digit, or whitespace
/// - Collapses whitespace
/// - Removes the standalone words "the", "a", "an" wherever they occur
///
/// Any input, including the empty string, produces a (possibly empty) key.
pub fn normalize(name: &str) -> String {
    let lowered = name.nfc().collect::<String>().to_lowercase();

    // Recompose: stripping can bring a base letter next to a combining mark
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .nfc()
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !ARTICLES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether two raw names share a canonical key
pub fn same_key(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bench Press", "bench press")]
    #[case("bench press!", "bench press")]
    #[case("  Barbell   Row  ", "barbell row")]
    #[case("Pull-Up", "pullup")]
    #[case("The Squat", "squat")]
    #[case("Farmer's Walk", "farmers walk")]
    #[case("Curl an a Bar the End", "curl bar end")]
    #[case("Theory Lift", "theory lift")]
    #[case("21s (Bicep)", "21s bicep")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_empty_and_symbols() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize("the a an"), "");
    }

    #[test]
    fn test_normalize_keeps_diacritics() {
        assert_eq!(normalize("Développé Couché"), "développé couché");
        // Decomposed "e" + combining acute composes to the same key
        assert_eq!(normalize("De\u{301}veloppe\u{301}"), normalize("Développé"));
    }

    #[test]
    fn test_normalize_tabs_and_newlines() {
        assert_eq!(normalize("Hip\tThrust\n"), "hip thrust");
    }

    #[test]
    fn test_normalize_idempotent() {
        for name in ["The Bench-Press!!", "  A  Deadlift ", "Développé", ""] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_same_key() {
        assert!(same_key("Bench Press", "bench press!"));
        assert!(!same_key("Bench Press", "Squat"));
    }
}
