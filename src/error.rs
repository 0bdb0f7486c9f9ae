use crate::stations::error::LocateStationError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuienradarError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    LocateStation(#[from] LocateStationError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("Unable to parse coordinate '{value}' for parameter '{key}'")]
    InvalidCoordinate { key: String, value: String },

    #[error("Unable to parse interval '{0}'")]
    InvalidInterval(String),

    #[error("Interval of {0} minutes is too small, buienradar updates every 10 minutes")]
    IntervalTooSmall(u32),

    #[error("Unable to parse rain timeframe '{0}'")]
    InvalidRainTimeframe(String),

    #[error("Unknown rain forecast mode '{0}', expected 'average' or 'max'")]
    InvalidRainMode(String),
}
