/// Number of significant digits used for converted concentrations and derived scalars.
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Formats a value with a fixed number of significant digits, `%g` style.
///
/// Trailing zeros are dropped, and scientific notation is used when the decimal
/// exponent falls below `-4` or reaches the requested precision.
pub fn format_sig(value: f64, significant: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = significant.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Shortest round-trip decimal rendering; whole numbers keep a `.0` fraction.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Formats a value with two decimals, as used for molecular mass columns.
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Renders an optional value with [`SIGNIFICANT_DIGITS`], or an empty cell.
pub fn format_optional(value: Option<f64>) -> String {
    value
        .map(|v| format_sig(v, SIGNIFICANT_DIGITS))
        .unwrap_or_default()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_within_precision_have_no_fraction() {
        assert_eq!(format_sig(10000.0, 6), "10000");
        assert_eq!(format_sig(5.0, 6), "5");
        assert_eq!(format_sig(-42.0, 6), "-42");
    }

    #[test]
    fn fractions_are_rounded_to_significant_digits() {
        assert_eq!(format_sig(6.25, 6), "6.25");
        assert_eq!(format_sig(2.8000000000000003, 6), "2.8");
        assert_eq!(format_sig(1.0 / 3.0, 6), "0.333333");
        assert_eq!(format_sig(3.35689045936, 6), "3.35689");
    }

    #[test]
    fn large_and_small_magnitudes_use_scientific_notation() {
        assert_eq!(format_sig(1_000_000.0, 6), "1e+06");
        assert_eq!(format_sig(1_234_567.0, 6), "1.23457e+06");
        assert_eq!(format_sig(0.00001, 6), "1e-05");
        assert_eq!(format_sig(0.0001, 6), "0.0001");
    }

    #[test]
    fn rounding_that_bumps_the_exponent_is_handled() {
        assert_eq!(format_sig(999999.5, 6), "1e+06");
        assert_eq!(format_sig(9.999999, 6), "10");
    }

    #[test]
    fn special_values_are_rendered_verbatim() {
        assert_eq!(format_sig(0.0, 6), "0");
        assert_eq!(format_sig(f64::NAN, 6), "nan");
        assert_eq!(format_sig(f64::NEG_INFINITY, 6), "-inf");
    }

    #[test]
    fn decimal_rendering_keeps_a_fraction() {
        assert_eq!(format_decimal(3.0), "3.0");
        assert_eq!(format_decimal(-1.0), "-1.0");
        assert_eq!(format_decimal(-0.5), "-0.5");
        assert_eq!(format_decimal(2.25), "2.25");
    }

    #[test]
    fn fixed_two_decimals_and_optional_cells() {
        assert_eq!(format_fixed2(1234.5), "1234.50");
        assert_eq!(format_optional(None), "");
        assert_eq!(format_optional(Some(0.25)), "0.25");
    }
}
