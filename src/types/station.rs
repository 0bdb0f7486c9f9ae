//! Defines the data structures representing buienradar weather stations and their
//! latest readings, plus the home coordinate they are resolved against.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use buienradar::LatLon;
///
/// let den_haag = LatLon(52.095556, 4.316389);
/// assert_eq!(den_haag.lat(), 52.095556);
/// assert_eq!(den_haag.lon(), 4.316389);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

/// A single buienradar weather station and the readings it published in one feed.
///
/// Every reading is optional: many stations only measure wind, and the feed marks
/// missing values with `-`. An absent reading is never the same as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// The buienradar station identifier (e.g. "6260" for De Bilt).
    pub id: String,
    /// Human readable station name (e.g. "Meetstation De Bilt").
    pub name: String,
    /// Region the station reports for, if given.
    pub region: Option<String>,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Local time of the observation.
    pub observed_at: Option<NaiveDateTime>,
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Wind bearing in degrees.
    pub wind_bearing: Option<f64>,
    /// Wind gusts in m/s.
    pub wind_gusts: Option<f64>,
    /// Air pressure in hPa.
    pub pressure: Option<f64>,
    /// Relative humidity in %.
    pub humidity: Option<f64>,
    /// Visibility in meters.
    pub visibility: Option<f64>,
    /// Solar irradiance in W/m².
    pub solar_irradiance: Option<f64>,
    /// Rain rate in mm/h.
    pub rain_rate: Option<f64>,
}

impl StationRecord {
    /// Creates a record at the given position with every reading absent.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: None,
            lat,
            lon,
            observed_at: None,
            temperature: None,
            wind_speed: None,
            wind_bearing: None,
            wind_gusts: None,
            pressure: None,
            humidity: None,
            visibility: None,
            solar_irradiance: None,
            rain_rate: None,
        }
    }

    pub fn location(&self) -> LatLon {
        LatLon(self.lat, self.lon)
    }

    /// Returns a copy of `self` with pressure and visibility filled in from `reference`
    /// where `self` lacks them. No other readings are substituted.
    pub fn merged_with_reference(&self, reference: &StationRecord) -> StationRecord {
        StationRecord {
            pressure: self.pressure.or(reference.pressure),
            visibility: self.visibility.or(reference.visibility),
            ..self.clone()
        }
    }
}

/// The station picked for the home location together with its distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStation {
    pub station: StationRecord,
    pub distance_km: f64,
}

/// Today's forecast text as published alongside the station list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodayForecast {
    pub published_at: Option<NaiveDateTime>,
    pub summary: Option<String>,
    pub text: Option<String>,
}

/// All stations from one feed, in document order, plus today's forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationCatalog {
    pub stations: Vec<StationRecord>,
    pub today_forecast: Option<TodayForecast>,
}

impl StationCatalog {
    pub fn station(&self, id: &str) -> Option<&StationRecord> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
