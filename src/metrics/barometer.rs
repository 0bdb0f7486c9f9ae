//! Defines the `BarometerForecast` enum, the weather trend a barometer device shows
//! for a given air pressure.

use serde::Serialize;

/// Forecast derived from air pressure.
///
/// The discriminants are the codes the host platform's barometer device expects,
/// which is why they are not in pressure order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum BarometerForecast {
    /// Code 0: pressure between 1013 and 1033 hPa.
    Stable = 0,
    /// Code 1: pressure of 1033 hPa and up.
    Sunny = 1,
    /// Code 2: pressure between 993 and 1007 hPa.
    Cloudy = 2,
    /// Code 3: pressure between 1007 and 1013 hPa.
    Unstable = 3,
    /// Code 4: pressure below 966 hPa.
    Thunderstorm = 4,
    /// Code 5: no pressure reading.
    Unknown = 5,
    /// Code 6: pressure between 966 and 993 hPa.
    Rain = 6,
}

impl BarometerForecast {
    /// Steps through the pressure thresholds, each bound is exclusive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use buienradar::BarometerForecast;
    ///
    /// assert_eq!(BarometerForecast::from_pressure(Some(1020.0)), BarometerForecast::Stable);
    /// assert_eq!(BarometerForecast::from_pressure(Some(900.0)).code(), 4);
    /// assert_eq!(BarometerForecast::from_pressure(None).code(), 5);
    /// ```
    pub fn from_pressure(pressure_hpa: Option<f64>) -> Self {
        let Some(p) = pressure_hpa else {
            return BarometerForecast::Unknown;
        };
        if p < 966.0 {
            BarometerForecast::Thunderstorm
        } else if p < 993.0 {
            BarometerForecast::Rain
        } else if p < 1007.0 {
            BarometerForecast::Cloudy
        } else if p < 1013.0 {
            BarometerForecast::Unstable
        } else if p < 1033.0 {
            BarometerForecast::Stable
        } else {
            BarometerForecast::Sunny
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}
