//! Parsing of user-entered values and the break-time adjustment.

/// Parse a user-entered value. Missing, empty or non-numeric text yields NaN,
/// so that it fails the finiteness checks downstream instead of erroring.
pub(crate) fn parse_value(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Break minutes only count when they are a finite, non-negative number.
pub(crate) fn sanitize_break(break_minutes: Option<f64>) -> Option<f64> {
    break_minutes.filter(|m| m.is_finite() && *m >= 0.0)
}

/// Input hours after deducting the break, clamped at zero.
pub(crate) fn effective_input(input_hours: f64, break_minutes: Option<f64>) -> f64 {
    match sanitize_break(break_minutes) {
        Some(minutes) if input_hours.is_finite() => (input_hours - minutes / 60.0).max(0.0),
        _ => input_hours,
    }
}

/// Zero-fill a value for storage.
pub(crate) fn stored(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_value(Some(" 42.5 ")), 42.5);
        assert_eq!(parse_value(Some("-3")), -3.0);
    }

    #[test]
    fn garbage_parses_to_nan() {
        assert!(parse_value(Some("abc")).is_nan());
        assert!(parse_value(Some("")).is_nan());
        assert!(parse_value(None).is_nan());
    }

    #[test]
    fn break_is_deducted_and_clamped() {
        assert_eq!(effective_input(2.0, Some(30.0)), 1.5);
        assert_eq!(effective_input(0.5, Some(60.0)), 0.0);
        assert_eq!(effective_input(2.0, None), 2.0);
    }

    #[test]
    fn negative_or_nan_break_is_ignored() {
        assert_eq!(effective_input(2.0, Some(-30.0)), 2.0);
        assert_eq!(effective_input(2.0, Some(f64::NAN)), 2.0);
    }

    #[test]
    fn nan_input_stays_nan() {
        assert!(effective_input(f64::NAN, Some(30.0)).is_nan());
    }
}
