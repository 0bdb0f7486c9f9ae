//! Plugin settings as configured on the host platform.

use crate::error::SettingsError;
use crate::types::forecast::ForecastMode;
use crate::types::station::LatLon;
use crate::utils::{parse_float_value, parse_int_value};
use bon::Builder;
use std::collections::HashMap;

/// Buienradar only refreshes its data every 10 minutes, polling faster gains nothing.
pub const MIN_INTERVAL_MINUTES: u32 = 10;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15;
pub const DEFAULT_RAIN_TIMEFRAME_MINUTES: u32 = 30;

const PARAM_LATITUDE: &str = "Mode1";
const PARAM_LONGITUDE: &str = "Mode2";
const PARAM_INTERVAL: &str = "Mode3";
const PARAM_COMBINED_TEMP_HUM: &str = "Mode4";
const PARAM_WIND_CHILL: &str = "Mode5";
const PARAM_RAIN_TIMEFRAME: &str = "Mode6";
const PARAM_RAIN_MODE: &str = "Mode7";

/// Everything the plugin reads from the host configuration.
///
/// # Examples
///
/// ```
/// use buienradar::{LatLon, PluginSettings};
///
/// let settings = PluginSettings::builder()
///     .home(LatLon(52.095556, 4.316389))
///     .build();
/// assert_eq!(settings.interval_minutes, 15);
/// assert!(settings.include_wind_chill);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PluginSettings {
    pub home: LatLon,
    #[builder(default = DEFAULT_INTERVAL_MINUTES)]
    pub interval_minutes: u32,
    /// Temperature and humidity in one device instead of two.
    #[builder(default = true)]
    pub combined_temperature_humidity: bool,
    /// Use the wind device variant that also carries temperature and wind chill.
    #[builder(default = true)]
    pub include_wind_chill: bool,
    #[builder(default = DEFAULT_RAIN_TIMEFRAME_MINUTES)]
    pub rain_timeframe_minutes: u32,
    #[builder(default)]
    pub rain_mode: ForecastMode,
}

impl PluginSettings {
    /// Reads the settings from the host's `ModeN` parameters.
    ///
    /// Latitude, longitude and interval are required. The two device layout flags
    /// are true only for the literal `"True"`, matching how the host stores option
    /// values. Rain timeframe and mode are optional.
    pub fn from_parameters(params: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let lat = coordinate(params, PARAM_LATITUDE)?;
        let lon = coordinate(params, PARAM_LONGITUDE)?;

        let raw_interval = required(params, PARAM_INTERVAL)?;
        let interval = parse_int_value(raw_interval)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| SettingsError::InvalidInterval(raw_interval.to_string()))?;
        if interval < MIN_INTERVAL_MINUTES {
            return Err(SettingsError::IntervalTooSmall(interval));
        }

        let rain_timeframe_minutes = match optional(params, PARAM_RAIN_TIMEFRAME) {
            Some(raw) => parse_int_value(raw)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| SettingsError::InvalidRainTimeframe(raw.to_string()))?,
            None => DEFAULT_RAIN_TIMEFRAME_MINUTES,
        };

        let rain_mode = match optional(params, PARAM_RAIN_MODE) {
            Some(raw) => raw
                .parse::<ForecastMode>()
                .map_err(SettingsError::InvalidRainMode)?,
            None => ForecastMode::default(),
        };

        Ok(Self {
            home: LatLon(lat, lon),
            interval_minutes: interval,
            combined_temperature_humidity: flag(params, PARAM_COMBINED_TEMP_HUM),
            include_wind_chill: flag(params, PARAM_WIND_CHILL),
            rain_timeframe_minutes,
            rain_mode,
        })
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, SettingsError> {
    optional(params, key).ok_or_else(|| SettingsError::MissingParameter(key.to_string()))
}

fn optional<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn coordinate(params: &HashMap<String, String>, key: &str) -> Result<f64, SettingsError> {
    let raw = required(params, key)?;
    parse_float_value(raw).ok_or_else(|| SettingsError::InvalidCoordinate {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn flag(params: &HashMap<String, String>, key: &str) -> bool {
    optional(params, key) == Some("True")
}
