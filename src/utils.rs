/// Parses a float from feed text, returning `None` for anything that isn't a finite number.
///
/// The feed uses `-` as a placeholder for values a station doesn't measure, so
/// failure here is routine and never an error.
pub fn parse_float_value(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer from feed or parameter text, returning `None` on failure.
pub fn parse_int_value(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Same as [`parse_float_value`] for an optional element.
pub(crate) fn parse_opt_float(s: Option<&str>) -> Option<f64> {
    s.and_then(parse_float_value)
}

/// Rounds half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
