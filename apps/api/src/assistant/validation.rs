//! Pure input validators for the intake stages. No side effects, no state.

use regex::Regex;

/// Prefix-anchored email shape check. Deliberately NOT a full-string match:
/// trailing text after a valid-looking prefix is accepted (so
/// `"jane@example.com extra"` passes). Tightening this is a visible
/// behavior change — see the pinning test below.
static EMAIL_PATTERN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[\w\.-]+@[\w\.-]+\.\w+").unwrap());

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

/// Strips every non-digit character and returns the remaining digits iff
/// exactly 10 remain, in their original order. Accepts formats like
/// `(555) 123-4567` or `555.123.4567`.
pub fn normalize_phone(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        Some(digits)
    } else {
        None
    }
}

/// Parses years of experience as a float and accepts 0–50 inclusive.
/// NaN and infinities fall outside the range and are rejected.
pub fn parse_experience(input: &str) -> Option<f64> {
    let years: f64 = input.trim().parse().ok()?;
    if (0.0..=50.0).contains(&years) {
        Some(years)
    } else {
        None
    }
}

/// Collapses internal whitespace runs and trims the ends.
/// Never fails; an all-whitespace input yields an empty name.
pub fn clean_name(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits on commas and trims each token. Empty and duplicate tokens are
/// kept verbatim — the store persists exactly what the candidate typed.
pub fn parse_tech_stack(input: &str) -> Vec<String> {
    input.split(',').map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_standard_shape() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("jane.doe-1@sub.example.co"));
    }

    #[test]
    fn test_email_rejects_missing_at_or_tld() {
        assert!(!is_valid_email("janeexample.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_rejects_leading_whitespace() {
        // The pattern is anchored at the start, so padding fails the check.
        assert!(!is_valid_email(" jane@example.com"));
    }

    #[test]
    fn test_email_prefix_match_accepts_trailing_text() {
        // Pins the deliberate looseness: only the prefix is checked.
        assert!(is_valid_email("jane@example.com extra garbage"));
    }

    #[test]
    fn test_phone_strips_punctuation_and_keeps_digit_order() {
        assert_eq!(
            normalize_phone("(555) 123-4567").as_deref(),
            Some("5551234567")
        );
        assert_eq!(
            normalize_phone("555.123.4567").as_deref(),
            Some("5551234567")
        );
        assert_eq!(
            normalize_phone(" 5 5 5 1 2 3 4 5 6 7 ").as_deref(),
            Some("5551234567")
        );
    }

    #[test]
    fn test_phone_requires_exactly_ten_digits() {
        assert!(normalize_phone("555-123-456").is_none()); // 9 digits
        assert!(normalize_phone("+1 555 123 4567").is_none()); // 11 digits
        assert!(normalize_phone("").is_none());
        assert!(normalize_phone("no digits here").is_none());
    }

    #[test]
    fn test_experience_accepts_range_inclusive() {
        assert_eq!(parse_experience("3.5"), Some(3.5));
        assert_eq!(parse_experience("0"), Some(0.0));
        assert_eq!(parse_experience("50"), Some(50.0));
        assert_eq!(parse_experience(" 2.5 "), Some(2.5));
    }

    #[test]
    fn test_experience_rejects_out_of_range() {
        assert!(parse_experience("50.1").is_none());
        assert!(parse_experience("-1").is_none());
    }

    #[test]
    fn test_experience_rejects_non_numeric_and_non_finite() {
        assert!(parse_experience("five").is_none());
        assert!(parse_experience("").is_none());
        assert!(parse_experience("inf").is_none());
        assert!(parse_experience("NaN").is_none());
    }

    #[test]
    fn test_clean_name_collapses_whitespace() {
        assert_eq!(clean_name("  Jane   Doe  "), "Jane Doe");
        assert_eq!(clean_name("Jane\tDoe"), "Jane Doe");
    }

    #[test]
    fn test_clean_name_all_whitespace_yields_empty() {
        assert_eq!(clean_name("   "), "");
    }

    #[test]
    fn test_tech_stack_split_keeps_empty_and_duplicate_tokens() {
        assert_eq!(
            parse_tech_stack("Python, React, , Go, Rust"),
            vec!["Python", "React", "", "Go", "Rust"]
        );
        assert_eq!(parse_tech_stack("Go, Go"), vec!["Go", "Go"]);
    }

    #[test]
    fn test_tech_stack_single_and_empty_input() {
        assert_eq!(parse_tech_stack("Rust"), vec!["Rust"]);
        // Splitting an empty string still yields one (empty) token.
        assert_eq!(parse_tech_stack(""), vec![""]);
    }
}
