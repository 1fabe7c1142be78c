//! Display formatting for calculator values.
//!
//! Two forms exist on purpose. Service results go through [`format_result`],
//! which caps fractional digits at 10 and strips trailing zeros. Locally
//! computed values (negate, percent, request payloads, history labels) go
//! through [`format_number`], the shortest round-trip decimal form.

/// Format a numeric result from the evaluation service for the display.
///
/// Integers render without a decimal point; everything else renders with at
/// most 10 fractional digits, trailing zeros (and a then-dangling point)
/// stripped.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0 as well
        "0".to_string()
    } else if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let fixed = format!("{value:.10}");
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Shortest round-trip form of a locally computed value.
///
/// Negative zero renders as `0`, matching the display invariant that a
/// value never starts with a spurious sign.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_render_plain() {
        assert_eq!(format_result(5.0), "5");
        assert_eq!(format_result(-3.0), "-3");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(1234567.0), "1234567");
    }

    #[test]
    fn test_fractions_trim_trailing_zeros() {
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(-2.5), "-2.5");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn test_tiny_fraction_collapses_to_zero() {
        // Below the 10-digit cap everything rounds away.
        assert_eq!(format_result(1e-11), "0");
    }

    #[test]
    fn test_negative_zero_result() {
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_number_shortest_form() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.07), "0.07");
    }

    #[test]
    fn test_format_number_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.0 * -1.0), "0");
    }
}
