use crate::utils::round_to;

/// Upper (inclusive) bound of each compass band, starting at NNE. N takes what is left
/// on both sides of 0°.
const COMPASS_BANDS: [(f64, &str); 15] = [
    (33.0, "NNE"),
    (56.0, "NE"),
    (78.0, "ENE"),
    (101.0, "E"),
    (123.0, "ESE"),
    (146.0, "SE"),
    (168.0, "SSE"),
    (191.0, "S"),
    (213.0, "SSW"),
    (236.0, "SW"),
    (258.0, "WSW"),
    (281.0, "W"),
    (303.0, "WNW"),
    (326.0, "NW"),
    (348.0, "NNW"),
];

/// Wind chill (JAG/TI) in °C, rounded to 1 decimal.
///
/// Only defined for -46..=10 °C and 1.3..=49 m/s. Outside that, or without a wind
/// reading, the plain temperature is returned.
///
/// ```rust
/// use buienradar::wind_chill;
///
/// assert_eq!(wind_chill(Some(15.0), Some(10.0)), Some(15.0));
/// assert_eq!(wind_chill(None, Some(10.0)), None);
/// ```
pub fn wind_chill(temperature: Option<f64>, wind_speed: Option<f64>) -> Option<f64> {
    let t = temperature?;
    let Some(w) = wind_speed else {
        return Some(t);
    };
    if !(-46.0..=10.0).contains(&t) || !(1.3..=49.0).contains(&w) {
        return Some(t);
    }
    let w016 = w.powf(0.16);
    Some(round_to(13.12 + 0.6215 * t - 13.96 * w016 + 0.4867 * t * w016, 1))
}

/// 16-point compass text for a bearing in degrees, empty when absent or outside 0..=360.
pub fn compass_direction(bearing: Option<f64>) -> &'static str {
    let Some(b) = bearing else {
        return "";
    };
    if !(0.0..=360.0).contains(&b) {
        return "";
    }
    if b > 348.0 || b <= 11.0 {
        return "N";
    }
    COMPASS_BANDS
        .iter()
        .find(|(upper, _)| b <= *upper)
        .map(|(_, text)| *text)
        .unwrap_or("N")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_chill_formula() {
        let w016 = 10f64.powf(0.16);
        let expected = round_to(13.12 + 0.6215 * 5.0 - 13.96 * w016 + 0.4867 * 5.0 * w016, 1);
        assert_eq!(wind_chill(Some(5.0), Some(10.0)), Some(expected));
        assert_eq!(expected, -0.4);
    }

    #[test]
    fn test_wind_chill_out_of_range() {
        assert_eq!(wind_chill(Some(15.0), Some(10.0)), Some(15.0));
        assert_eq!(wind_chill(Some(-50.0), Some(10.0)), Some(-50.0));
        assert_eq!(wind_chill(Some(5.0), Some(1.0)), Some(5.0));
        assert_eq!(wind_chill(Some(5.0), Some(50.0)), Some(5.0));
        assert_eq!(wind_chill(Some(5.0), None), Some(5.0));
        assert_eq!(wind_chill(None, None), None);
    }

    #[test]
    fn test_wind_chill_range_is_inclusive() {
        assert_ne!(wind_chill(Some(10.0), Some(1.3)), Some(10.0));
        assert_ne!(wind_chill(Some(-46.0), Some(49.0)), Some(-46.0));
    }

    #[test]
    fn test_compass_direction() {
        assert_eq!(compass_direction(Some(0.0)), "N");
        assert_eq!(compass_direction(Some(11.0)), "N");
        assert_eq!(compass_direction(Some(11.5)), "NNE");
        assert_eq!(compass_direction(Some(45.0)), "NE");
        assert_eq!(compass_direction(Some(90.0)), "E");
        assert_eq!(compass_direction(Some(180.0)), "S");
        assert_eq!(compass_direction(Some(200.0)), "SSW");
        assert_eq!(compass_direction(Some(270.0)), "W");
        assert_eq!(compass_direction(Some(348.0)), "NNW");
        assert_eq!(compass_direction(Some(359.0)), "N");
        assert_eq!(compass_direction(Some(360.0)), "N");
    }

    #[test]
    fn test_compass_direction_invalid() {
        assert_eq!(compass_direction(Some(400.0)), "");
        assert_eq!(compass_direction(Some(-1.0)), "");
        assert_eq!(compass_direction(None), "");
    }
}
