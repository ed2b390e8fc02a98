//! Duration normalization.
//!
//! The provider hands back durations as display text ("1 hour 20 mins").
//! Comparing two routes only needs those strings reduced to whole minutes.

use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only; Unicode `\d` would admit digits `u64::from_str` rejects.
const DURATION_TOKEN_REGEX: &str = r"(?i)([0-9]+)\s*(hour|hr|min)";

static DURATION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DURATION_TOKEN_REGEX).expect("duration token pattern is a valid regex")
});

/// Parse a human-readable duration into minutes.
///
/// Every `<integer> (hour|hr|min)` token is summed; hour tokens count 60
/// minutes per unit. Text that matches no token contributes nothing, so the
/// result is `0` for empty or unrecognized input. Values too large for `u64`
/// saturate.
pub fn parse_duration(text: &str) -> u64 {
    DURATION_TOKEN
        .captures_iter(text)
        .map(|caps| {
            // The capture is all ASCII digits, so the only parse failure is overflow.
            let amount = caps[1].parse::<u64>().unwrap_or(u64::MAX);
            let unit = caps[2].to_ascii_lowercase();
            if unit == "min" {
                amount
            } else {
                amount.saturating_mul(60)
            }
        })
        .fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_durations() {
        assert_eq!(parse_duration("1 hour 20 mins"), 80);
        assert_eq!(parse_duration("45 mins"), 45);
        assert_eq!(parse_duration("2 hours"), 120);
        assert_eq!(parse_duration("15 mins"), 15);
    }

    #[test]
    fn test_unrecognized_text_is_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("garbage"), 0);
        assert_eq!(parse_duration("3 days"), 0);
        assert_eq!(parse_duration("mins"), 0);
    }

    #[test]
    fn test_case_and_spacing() {
        assert_eq!(parse_duration("1 HOUR 5 MINS"), 65);
        assert_eq!(parse_duration("2hrs 10min"), 130);
        assert_eq!(parse_duration("1hr"), 60);
    }

    #[test]
    fn test_ignores_surrounding_noise() {
        assert_eq!(parse_duration("about 1 day 2 hours, maybe 7 mins"), 127);
    }

    #[test]
    fn test_huge_values_saturate() {
        let text = format!("{} hours {} mins", "9".repeat(40), u64::MAX);
        assert_eq!(parse_duration(&text), u64::MAX);
    }

    #[test]
    fn test_non_ascii_digits_contribute_nothing() {
        assert_eq!(parse_duration("\u{0661}\u{0665} mins"), 0);
        assert_eq!(parse_duration("\u{FF11}\u{FF15} hours"), 0);
        assert_eq!(parse_duration("\u{0661} hour 5 mins"), 5);
    }

    #[test]
    fn test_odd_inputs_stay_bounded() {
        let long_digits = "7".repeat(10_000);
        let long_noise = "x".repeat(100_000);
        let cases: Vec<(String, u64)> = vec![
            ("12345".to_string(), 0),
            ("hour".to_string(), 0),
            ("min min hr".to_string(), 0),
            ("-5 mins".to_string(), 5),
            ("5.5 hours".to_string(), 300),
            ("\u{1F697} 3 mins \u{1F697}".to_string(), 3),
            ("\u{0966}\u{0967}\u{0968} hr".to_string(), 0),
            ("\0\n\t 4 min".to_string(), 4),
            (long_noise.clone(), 0),
            (format!("{} 2 mins", long_noise), 2),
            (format!("{} mins", long_digits), u64::MAX),
            ("10 mins ".repeat(1_000), 10_000),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_duration(&input), expected, "input {:?}", input.chars().take(40).collect::<String>());
        }
    }
}
