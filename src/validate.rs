use regex::Regex;
use std::sync::OnceLock;

pub const EMPTY_QUERY: &str = "Kindly enter your query.";
pub const TOO_SHORT: &str = "Please provide more details.";
pub const MISSING_MEASUREMENTS: &str = "Please provide at least two measurement sizes (your underbust and bust measurements) along with your query.";
pub const INVALID_MEASUREMENTS: &str = "Kindly enter valid measurements";

/// Inclusive range (inches) a plausible band or bust measurement falls in.
const MEASUREMENT_RANGE: std::ops::RangeInclusive<f64> = 20.0..=60.0;

/// Matches integer or decimal measurement values ("32", "32.5").
fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"\d+(\.\d+)?").expect("pattern is valid"))
}

/// Checks a query before it is sent to the fitting service.
///
/// The query must be non-empty, at least five characters once trimmed, and
/// contain at least two numbers (underbust and bust) in the 20-60 range.
/// Extra numbers are accepted but every number found must pass the range
/// check. Pure function: no side effects, same verdict for the same input.
pub fn validate_query(input: &str) -> Result<(), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EMPTY_QUERY);
    }
    if trimmed.chars().count() < 5 {
        return Err(TOO_SHORT);
    }

    let numbers: Vec<f64> = number_pattern()
        .find_iter(input)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    if numbers.len() < 2 {
        return Err(MISSING_MEASUREMENTS);
    }
    if numbers.iter().any(|n| !MEASUREMENT_RANGE.contains(n)) {
        return Err(INVALID_MEASUREMENTS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(validate_query(""), Err(EMPTY_QUERY));
        assert_eq!(validate_query("   "), Err(EMPTY_QUERY));
        assert_eq!(validate_query("\t\n"), Err(EMPTY_QUERY));
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(validate_query("32"), Err(TOO_SHORT));
        assert_eq!(validate_query("  32  "), Err(TOO_SHORT));
        assert_eq!(validate_query("ab 1"), Err(TOO_SHORT));
    }

    #[test]
    fn length_is_measured_after_trimming() {
        // Five characters once trimmed, so the length check passes and the
        // measurement count check fires instead.
        assert_eq!(validate_query("  abcde  "), Err(MISSING_MEASUREMENTS));
    }

    #[test]
    fn fewer_than_two_numbers_is_rejected() {
        assert_eq!(validate_query("no numbers here"), Err(MISSING_MEASUREMENTS));
        assert_eq!(
            validate_query("only my underbust is 32"),
            Err(MISSING_MEASUREMENTS)
        );
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert_eq!(validate_query("sizes 15 10"), Err(INVALID_MEASUREMENTS));
        assert_eq!(validate_query("32 and 100 maybe"), Err(INVALID_MEASUREMENTS));
        // One good number does not excuse a bad one.
        assert_eq!(validate_query("underbust 32 bust 19"), Err(INVALID_MEASUREMENTS));
    }

    #[test]
    fn borderline_length_with_bad_numbers_reports_the_range() {
        // "15 10" is exactly five characters, so it clears the length check
        // and fails on the range instead.
        assert_eq!(validate_query("15 10"), Err(INVALID_MEASUREMENTS));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(validate_query("from 20 to 60"), Ok(()));
        assert_eq!(validate_query("19.9 and 36"), Err(INVALID_MEASUREMENTS));
        assert_eq!(validate_query("36 and 60.1"), Err(INVALID_MEASUREMENTS));
    }

    #[test]
    fn well_formed_queries_pass() {
        assert_eq!(
            validate_query("underbust 32 bust 36, band feels loose"),
            Ok(())
        );
        assert_eq!(validate_query("30 34 straps dig in"), Ok(()));
    }

    #[test]
    fn decimals_are_understood() {
        assert_eq!(validate_query("32.5 and 36.75 please"), Ok(()));
    }

    #[test]
    fn extra_numbers_are_allowed_but_also_range_checked() {
        assert_eq!(validate_query("32 36 and also 40"), Ok(()));
        assert_eq!(validate_query("32 36 and also 90"), Err(INVALID_MEASUREMENTS));
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let input = "underbust 32 bust 36";
        assert_eq!(validate_query(input), validate_query(input));
        let bad = "15 10";
        assert_eq!(validate_query(bad), validate_query(bad));
    }
}
