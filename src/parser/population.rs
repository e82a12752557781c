//! Population heuristic: turns a card description such as
//! `"2.5b Population of Foo"` into an integer head count.
//!
//! Only the first two whitespace-separated tokens are looked at. The compact
//! `b Population` / `m Population` tags are expanded to `billion` / `million`,
//! then the pair is read as `<magnitude> <unit>`. Descriptions that do not
//! start that way fail with a [`PopulationError`] rather than defaulting.

use crate::error::{PopulationError, PopulationResult};

const BILLION_TAG: &str = "b Population";
const MILLION_TAG: &str = "m Population";

/// Power of ten for a unit token
fn unit_exponent(unit: &str) -> Option<i32> {
    match unit {
        "million" | "m" => Some(6),
        "billion" | "b" => Some(9),
        _ => None,
    }
}

/// Derive a population from a card description.
///
/// `None` and `""` yield `Ok(None)`. Errors are checked in order: missing
/// unit, unparseable magnitude, unknown unit.
pub fn parse_population(description: Option<&str>) -> PopulationResult<Option<i64>> {
    let description = match description {
        Some(d) if !d.is_empty() => d,
        _ => return Ok(None),
    };

    let mut prefix = description
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");

    if prefix.contains(BILLION_TAG) {
        prefix = prefix.replace(BILLION_TAG, " billion");
    } else if prefix.contains(MILLION_TAG) {
        prefix = prefix.replace(MILLION_TAG, " million");
    }

    let mut parts = prefix.split(' ');
    let magnitude = parts.next().unwrap_or_default();
    let unit = parts.next().ok_or_else(|| PopulationError::MissingUnit {
        description: description.to_string(),
    })?;

    let value: f64 = magnitude
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| PopulationError::InvalidMagnitude {
            magnitude: magnitude.to_string(),
            description: description.to_string(),
        })?;

    let exponent = unit_exponent(unit).ok_or_else(|| PopulationError::UnknownUnit {
        unit: unit.to_string(),
        description: description.to_string(),
    })?;

    let population = (value * 10f64.powi(exponent)).round();
    if population < i64::MIN as f64 || population >= i64::MAX as f64 {
        return Err(PopulationError::OutOfRange {
            description: description.to_string(),
        });
    }

    Ok(Some(population as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_billion() {
        assert_eq!(
            parse_population(Some("2.5 b Population of Foo")),
            Ok(Some(2_500_000_000))
        );
    }

    #[test]
    fn test_compact_tags() {
        assert_eq!(
            parse_population(Some("1.2b Population of a nation")),
            Ok(Some(1_200_000_000))
        );
        assert_eq!(
            parse_population(Some("45.678m Population of Testlandia")),
            Ok(Some(45_678_000))
        );
    }

    #[test]
    fn test_spelled_out_units() {
        assert_eq!(parse_population(Some("3 million people")), Ok(Some(3_000_000)));
        assert_eq!(parse_population(Some("7.1 billion")), Ok(Some(7_100_000_000)));
        assert_eq!(parse_population(Some("12 m Population")), Ok(Some(12_000_000)));
    }

    #[test]
    fn test_rounds_float_noise() {
        assert_eq!(parse_population(Some("4.35m Population")), Ok(Some(4_350_000)));
        assert_eq!(parse_population(Some("0.3 m")), Ok(Some(300_000)));
    }

    #[test]
    fn test_empty_or_absent_description() {
        assert_eq!(parse_population(None), Ok(None));
        assert_eq!(parse_population(Some("")), Ok(None));
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_population(Some("5 k Population")).unwrap_err();
        assert!(matches!(err, PopulationError::UnknownUnit { ref unit, .. } if unit == "k"));

        // Tag matching is case-sensitive
        let err = parse_population(Some("5B Population")).unwrap_err();
        assert!(matches!(err, PopulationError::InvalidMagnitude { .. }));
    }

    #[test]
    fn test_trailing_punctuation_is_not_a_unit() {
        assert!(matches!(
            parse_population(Some("1.2b Population, a nation")),
            Err(PopulationError::UnknownUnit { ref unit, .. }) if unit == "billion,"
        ));
    }

    #[test]
    fn test_missing_unit() {
        assert!(matches!(
            parse_population(Some("42")),
            Err(PopulationError::MissingUnit { .. })
        ));
        assert!(matches!(
            parse_population(Some("   ")),
            Err(PopulationError::MissingUnit { .. })
        ));
    }

    #[test]
    fn test_magnitude_checked_before_unit() {
        let err = parse_population(Some("Hello world")).unwrap_err();
        assert!(matches!(err, PopulationError::InvalidMagnitude { ref magnitude, .. } if magnitude == "Hello"));
        assert!(matches!(
            parse_population(Some("inf b")),
            Err(PopulationError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            parse_population(Some("1e300 billion")),
            Err(PopulationError::OutOfRange { .. })
        ));
    }
}
