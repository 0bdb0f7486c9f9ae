mod buienradar;
mod devices;
mod error;
mod metrics;
mod plugin;
mod rain;
mod session;
mod stations;
mod types;
mod utils;
mod weather_data;

#[cfg(test)]
mod testing;

pub use buienradar::*;
pub use error::{BuienradarError, SettingsError};
pub use plugin::*;
pub use session::WeatherSession;

pub use devices::*;

pub use metrics::barometer::BarometerForecast;
pub use metrics::humidity::HumidityStatus;
pub use metrics::wind::{compass_direction, wind_chill};

pub use rain::forecast::{parse_rain_forecast, parse_samples, sample_count, summarize};
pub use rain::rain_urls;

pub use stations::catalog::parse_catalog;
pub use stations::locate_station::{haversine_km, StationLocator, EARTH_RADIUS_KM, MAX_STATION_DISTANCE_KM};

pub use types::forecast::*;
pub use types::observation::Observation;
pub use types::settings::*;
pub use types::station::*;

pub use utils::{parse_float_value, parse_int_value};

pub use weather_data::extractor::{extract_observation, extract_station, REFERENCE_STATION_ID};
pub use weather_data::fetcher::DocumentFetcher;

pub use stations::error::LocateStationError;
pub use weather_data::error::WeatherDataError;
