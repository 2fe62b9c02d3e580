use crate::core::models::bound::ConcentrationBound;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConcentrationParseError {
    #[error("Malformed concentration '{0}'")]
    Malformed(String),
    #[error("Invalid mean or error in '{0}'")]
    InvalidMeanError(String),
}

const PLUS_MINUS: char = '±';
const ARROW: &str = "->";

/// Parses a free-text concentration into a bound, logging and discarding malformed input.
///
/// Never fails: anything that cannot be read yields [`ConcentrationBound::EMPTY`].
pub fn parse(raw: &str) -> ConcentrationBound {
    match try_parse(raw) {
        Ok(bound) => bound,
        Err(e) => {
            warn!("{}", e);
            ConcentrationBound::EMPTY
        }
    }
}

/// Parses a free-text concentration, reporting malformed input as an error.
///
/// Numeric fragments that fail to parse still become open ends rather than errors;
/// only a structurally malformed string or an unreadable `a±e` pair is rejected.
pub fn try_parse(raw: &str) -> Result<ConcentrationBound, ConcentrationParseError> {
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        return Ok(ConcentrationBound::EMPTY);
    }

    let dots = text.matches('.').count();
    let has_separator = text.contains(PLUS_MINUS) || text.contains(ARROW) || text.contains('-');
    if dots > 2 || (dots > 1 && !has_separator) {
        return Err(ConcentrationParseError::Malformed(text));
    }

    if let Some((mean, error)) = text.split_once(PLUS_MINUS) {
        return match (number(mean), number(error)) {
            (Some(mean), Some(error)) => Ok(ConcentrationBound::new(
                Some((mean - error).max(0.0)),
                Some(mean + error),
            )),
            _ => Err(ConcentrationParseError::InvalidMeanError(text)),
        };
    }

    if let Some((lower, upper)) = text.split_once(ARROW) {
        return Ok(ConcentrationBound::new(number(lower), number(upper)));
    }
    if let Some(value) = text.strip_prefix("<=") {
        return Ok(ConcentrationBound::new(None, number(value)));
    }
    if let Some(value) = text.strip_prefix(">=").or_else(|| text.strip_prefix('>')) {
        return Ok(ConcentrationBound::new(number(value), None));
    }
    if let Some(value) = text.strip_prefix('<') {
        return Ok(ConcentrationBound::new(None, number(value)));
    }
    if let Some((lower, upper)) = split_range(&text) {
        return Ok(ConcentrationBound::new(number(lower), number(upper)));
    }

    let value = number(&text);
    Ok(ConcentrationBound::new(value, value))
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `a-b` on the first dash that can't be a sign: not leading, not after an exponent.
fn split_range(text: &str) -> Option<(&str, &str)> {
    let mut previous: Option<char> = None;
    for (position, c) in text.char_indices() {
        if c == '-' && position > 0 && !matches!(previous, Some('e' | 'E')) {
            let (lower, upper) = (&text[..position], &text[position + 1..]);
            if lower.trim().is_empty() || upper.trim().is_empty() {
                return None;
            }
            return Some((lower, upper));
        }
        previous = Some(c);
    }
    None
}

fn number(fragment: &str) -> Option<f64> {
    fragment
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn plain_range_gives_both_bounds() {
        let bound = parse("6.25-12.5");
        assert_eq!(bound.lower(), Some(6.25));
        assert_eq!(bound.upper(), Some(12.5));
    }

    #[test]
    fn greater_than_gives_lower_bound_only() {
        assert_eq!(parse(">25"), ConcentrationBound::new(Some(25.0), None));
        assert_eq!(parse(">= 25"), ConcentrationBound::new(Some(25.0), None));
    }

    #[test]
    fn less_than_forms_give_upper_bound_only() {
        assert_eq!(parse("<=0.25"), ConcentrationBound::new(None, Some(0.25)));
        assert_eq!(parse("<8"), ConcentrationBound::new(None, Some(8.0)));
    }

    #[test]
    fn mean_and_error_are_expanded_and_clamped_at_zero() {
        let bound = parse("3.9±1.1");
        assert!(close(bound.lower(), 2.8));
        assert!(close(bound.upper(), 5.0));

        let clamped = parse("1±3");
        assert_eq!(clamped.lower(), Some(0.0));
        assert_eq!(clamped.upper(), Some(4.0));
    }

    #[test]
    fn invalid_mean_error_is_rejected() {
        assert!(matches!(
            try_parse("abc±1"),
            Err(ConcentrationParseError::InvalidMeanError(_))
        ));
        assert!(parse("abc±1").is_empty());
    }

    #[test]
    fn arrow_gives_both_bounds() {
        assert_eq!(
            parse("2->4"),
            ConcentrationBound::new(Some(2.0), Some(4.0))
        );
    }

    #[test]
    fn empty_and_whitespace_give_empty_bound() {
        assert!(parse("").is_empty());
        assert!(parse(" \t ").is_empty());
    }

    #[test]
    fn too_many_decimal_points_are_malformed() {
        assert!(matches!(
            try_parse("4.5.5"),
            Err(ConcentrationParseError::Malformed(_))
        ));
        assert!(parse("4.5.5").is_empty());
        assert!(parse("1.2.3-4.5").is_empty());
    }

    #[test]
    fn two_decimal_points_with_separator_are_accepted() {
        assert_eq!(
            parse("1.5 - 3.5"),
            ConcentrationBound::new(Some(1.5), Some(3.5))
        );
    }

    #[test]
    fn single_value_fills_both_bounds() {
        assert_eq!(parse(" 16 "), ConcentrationBound::exact(16.0));
        assert_eq!(parse("1e-3"), ConcentrationBound::exact(0.001));
    }

    #[test]
    fn leading_dash_is_a_sign_not_a_range() {
        assert_eq!(parse("-5"), ConcentrationBound::exact(-5.0));
    }

    #[test]
    fn reversed_range_is_ordered() {
        assert_eq!(
            parse("12.5-6.25"),
            ConcentrationBound::new(Some(6.25), Some(12.5))
        );
    }

    #[test]
    fn unparseable_fragments_become_open_ends() {
        assert_eq!(parse("n/a"), ConcentrationBound::EMPTY);
        assert_eq!(parse("5-x"), ConcentrationBound::new(Some(5.0), None));
        assert_eq!(parse("<abc"), ConcentrationBound::EMPTY);
    }
}
