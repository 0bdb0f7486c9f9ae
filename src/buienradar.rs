//! This module provides the main entry point for talking to buienradar.nl. The client
//! fetches the station feed and the rain text and applies them to a caller-owned
//! [`WeatherSession`].

use crate::error::BuienradarError;
use crate::rain::rain_urls;
use crate::session::WeatherSession;
use crate::stations::catalog::parse_catalog;
use crate::types::forecast::{ForecastMode, ForecastResult};
use crate::types::observation::Observation;
use crate::types::station::{LatLon, StationCatalog};
use crate::weather_data::fetcher::{load_file, DocumentFetcher};
use bon::bon;
use chrono::Utc;
use std::path::Path;

pub const STATION_FEED_URL: &str = "https://xml.buienradar.nl/";
pub const STATION_FEED_BACKUP_URL: &str = "https://data.buienradar.nl/1.0/feed/xml";

/// The buienradar client.
///
/// It holds no weather state of its own; every refresh writes into the
/// [`WeatherSession`] passed in.
///
/// # Examples
///
/// ```no_run
/// # use buienradar::{Buienradar, BuienradarError, LatLon, WeatherSession};
/// # #[tokio::main]
/// # async fn main() -> Result<(), BuienradarError> {
/// let client = Buienradar::new()?;
/// let mut session = WeatherSession::new(LatLon(52.095556, 4.316389), 15);
///
/// let observation = client.refresh(&mut session).await?;
/// println!(
///     "{}: {:?} °C, wind {} {:?} m/s",
///     observation.station.name,
///     observation.station.temperature,
///     observation.wind_direction(),
///     observation.station.wind_speed,
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Buienradar {
    fetcher: DocumentFetcher,
    station_url: String,
    station_backup_url: String,
    rain_endpoints: Option<(String, String)>,
}

#[bon]
impl Buienradar {
    /// Creates a client against the public buienradar endpoints.
    pub fn new() -> Result<Self, BuienradarError> {
        Self::with_endpoints().call()
    }

    /// Creates a client with some or all endpoints replaced.
    ///
    /// Rain endpoints given here are used as-is; the default ones get the home
    /// coordinates appended per request.
    ///
    /// ```
    /// # use buienradar::Buienradar;
    /// let client = Buienradar::with_endpoints()
    ///     .station_url("http://localhost:8080/feed.xml".to_string())
    ///     .call()
    ///     .unwrap();
    /// ```
    #[builder]
    pub fn with_endpoints(
        station_url: Option<String>,
        station_backup_url: Option<String>,
        rain_url: Option<String>,
        rain_backup_url: Option<String>,
    ) -> Result<Self, BuienradarError> {
        let fetcher = DocumentFetcher::new().map_err(BuienradarError::HttpClient)?;
        let rain_endpoints = match (rain_url, rain_backup_url) {
            (Some(primary), Some(backup)) => Some((primary, backup)),
            (Some(primary), None) => Some((primary.clone(), primary)),
            (None, Some(backup)) => Some((backup.clone(), backup)),
            (None, None) => None,
        };
        Ok(Self {
            fetcher,
            station_url: station_url.unwrap_or_else(|| STATION_FEED_URL.to_string()),
            station_backup_url: station_backup_url
                .unwrap_or_else(|| STATION_FEED_BACKUP_URL.to_string()),
            rain_endpoints,
        })
    }

    /// Downloads and parses the station feed.
    pub async fn fetch_catalog(&self) -> Result<StationCatalog, BuienradarError> {
        let xml = self
            .fetcher
            .fetch_with_fallback(&self.station_url, &self.station_backup_url)
            .await?;
        Ok(parse_catalog(&xml)?)
    }

    /// Parses a station feed saved to disk.
    pub async fn load_catalog(&self, path: &Path) -> Result<StationCatalog, BuienradarError> {
        let xml = load_file(path).await?;
        Ok(parse_catalog(&xml)?)
    }

    /// Downloads the rain text for `home`.
    pub async fn fetch_rain_text(&self, home: LatLon) -> Result<String, BuienradarError> {
        let (primary, backup) = match &self.rain_endpoints {
            Some((primary, backup)) => (primary.clone(), backup.clone()),
            None => rain_urls(home),
        };
        Ok(self.fetcher.fetch_with_fallback(&primary, &backup).await?)
    }

    /// Fetches the station feed and updates `session` with the nearest station's readings.
    ///
    /// On failure the session keeps its previous observation.
    pub async fn refresh<'s>(
        &self,
        session: &'s mut WeatherSession,
    ) -> Result<&'s Observation, BuienradarError> {
        let catalog = self.fetch_catalog().await?;
        session.apply_catalog(&catalog, Utc::now())
    }

    /// Like [`Buienradar::refresh`], reading the station feed from disk.
    pub async fn refresh_from_file<'s>(
        &self,
        path: &Path,
        session: &'s mut WeatherSession,
    ) -> Result<&'s Observation, BuienradarError> {
        let catalog = self.load_catalog(path).await?;
        session.apply_catalog(&catalog, Utc::now())
    }

    /// Fetches the rain text for the session's home and updates its rain forecast.
    pub async fn refresh_rain<'s>(
        &self,
        session: &'s mut WeatherSession,
        timeframe_minutes: u32,
        mode: ForecastMode,
    ) -> Result<&'s ForecastResult, BuienradarError> {
        let text = self.fetch_rain_text(session.home()).await?;
        Ok(session.apply_rain_text(&text, timeframe_minutes, mode))
    }

    /// Like [`Buienradar::refresh_rain`], reading the rain text from disk.
    pub async fn refresh_rain_from_file<'s>(
        &self,
        path: &Path,
        session: &'s mut WeatherSession,
        timeframe_minutes: u32,
        mode: ForecastMode,
    ) -> Result<&'s ForecastResult, BuienradarError> {
        let text = load_file(path).await?;
        Ok(session.apply_rain_text(&text, timeframe_minutes, mode))
    }
}
