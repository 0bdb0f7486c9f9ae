//! The caller-owned state of a polling plugin: the latest observation, the station it
//! came from, the rain forecast and when data was last fetched successfully.

use crate::error::BuienradarError;
use crate::rain::forecast::parse_rain_forecast;
use crate::stations::locate_station::StationLocator;
use crate::types::forecast::{ForecastMode, ForecastResult};
use crate::types::observation::Observation;
use crate::types::station::{LatLon, ResolvedStation, StationCatalog};
use crate::weather_data::extractor::extract_observation;
use chrono::{DateTime, Duration, Utc};
use log::info;

#[derive(Debug, Clone)]
pub struct WeatherSession {
    locator: StationLocator,
    interval: Duration,
    resolved: Option<ResolvedStation>,
    observation: Option<Observation>,
    rain_forecast: Option<ForecastResult>,
    last_update: Option<DateTime<Utc>>,
}

impl WeatherSession {
    pub fn new(home: LatLon, interval_minutes: u32) -> Self {
        Self {
            locator: StationLocator::new(home),
            interval: Duration::minutes(i64::from(interval_minutes)),
            resolved: None,
            observation: None,
            rain_forecast: None,
            last_update: None,
        }
    }

    pub fn home(&self) -> LatLon {
        self.locator.home()
    }

    pub fn resolved_station(&self) -> Option<&ResolvedStation> {
        self.resolved.as_ref()
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    pub fn rain_forecast(&self) -> Option<&ForecastResult> {
        self.rain_forecast.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// True when the interval has passed since the last successful fetch, or when
    /// nothing was fetched yet.
    pub fn need_update(&self, now: DateTime<Utc>) -> bool {
        match self.last_update {
            Some(last) => now > last + self.interval,
            None => true,
        }
    }

    /// Resolves the nearest station in a freshly fetched catalog and replaces the
    /// observation with its readings.
    ///
    /// On error the previous observation stays in place, so devices keep showing the
    /// last known good values. A failed resolution does forget the resolved station.
    pub fn apply_catalog(
        &mut self,
        catalog: &StationCatalog,
        now: DateTime<Utc>,
    ) -> Result<&Observation, BuienradarError> {
        let resolved = match self.locator.nearest(&catalog.stations) {
            Ok(resolved) => resolved,
            Err(e) => {
                self.resolved = None;
                return Err(e.into());
            }
        };

        let changed = self
            .resolved
            .as_ref()
            .map_or(true, |previous| previous.station.id != resolved.station.id);
        if changed {
            info!(
                "Found {} at {:.1} km from your home location",
                resolved.station.name, resolved.distance_km
            );
        }

        let observation = extract_observation(catalog, &resolved, now)?;
        self.resolved = Some(resolved);
        self.last_update = Some(now);
        Ok(self.observation.insert(observation))
    }

    /// Replaces the rain forecast with one parsed from `text`.
    pub fn apply_rain_text(
        &mut self,
        text: &str,
        timeframe_minutes: u32,
        mode: ForecastMode,
    ) -> &ForecastResult {
        let result = parse_rain_forecast(text, timeframe_minutes, mode);
        self.rain_forecast.insert(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::catalog::parse_catalog;
    use crate::stations::error::LocateStationError;
    use crate::types::station::StationRecord;

    const DEN_HAAG: LatLon = LatLon(52.095556, 4.316389);
    const BERLIN: LatLon = LatLon(52.516667, 13.416667);

    fn sample_catalog() -> StationCatalog {
        parse_catalog(include_str!("../data/buienradar.xml")).unwrap()
    }

    #[test]
    fn test_need_update() {
        let mut session = WeatherSession::new(DEN_HAAG, 15);
        let start = Utc::now();
        assert!(session.need_update(start));

        session.apply_catalog(&sample_catalog(), start).unwrap();
        assert_eq!(session.last_update(), Some(start));
        assert!(!session.need_update(start + Duration::minutes(10)));
        assert!(!session.need_update(start + Duration::minutes(15)));
        assert!(session.need_update(start + Duration::minutes(15) + Duration::seconds(1)));
    }

    #[test]
    fn test_apply_catalog() {
        let mut session = WeatherSession::new(DEN_HAAG, 15);
        let observation = session.apply_catalog(&sample_catalog(), Utc::now()).unwrap();
        assert_eq!(observation.station.id, "6215");
        assert_eq!(observation.station.pressure, Some(1015.3));
        assert_eq!(session.resolved_station().unwrap().station.id, "6215");
    }

    #[test]
    fn test_failed_resolution_keeps_last_observation() {
        let mut session = WeatherSession::new(DEN_HAAG, 15);
        let first = Utc::now();
        session.apply_catalog(&sample_catalog(), first).unwrap();

        let mut wind_only = StationRecord::new("6210", "Scheveningen", 52.10, 4.26);
        wind_only.wind_speed = Some(8.5);
        let catalog = StationCatalog {
            stations: vec![wind_only],
            today_forecast: None,
        };
        let err = session
            .apply_catalog(&catalog, first + Duration::minutes(20))
            .unwrap_err();
        assert!(matches!(
            err,
            BuienradarError::LocateStation(LocateStationError::NoTemperatureStations)
        ));
        assert_eq!(session.observation().unwrap().station.id, "6215");
        assert_eq!(session.last_update(), Some(first));
        assert!(session.resolved_station().is_none());
    }

    #[test]
    fn test_home_outside_the_netherlands() {
        let mut session = WeatherSession::new(BERLIN, 15);
        let err = session.apply_catalog(&sample_catalog(), Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            BuienradarError::LocateStation(LocateStationError::TooFarAway { .. })
        ));
        assert!(session.observation().is_none());
        assert!(session.need_update(Utc::now()));
    }

    #[test]
    fn test_station_follows_catalog_changes() {
        let mut session = WeatherSession::new(DEN_HAAG, 15);
        let mut catalog = sample_catalog();
        session.apply_catalog(&catalog, Utc::now()).unwrap();

        // Voorschoten stops reporting temperature, Hoek van Holland is next.
        if let Some(s) = catalog.stations.iter_mut().find(|s| s.id == "6215") {
            s.temperature = None;
        }
        let observation = session.apply_catalog(&catalog, Utc::now()).unwrap();
        assert_eq!(observation.station.id, "6330");
    }

    #[test]
    fn test_apply_rain_text() {
        let mut session = WeatherSession::new(DEN_HAAG, 15);
        assert!(session.rain_forecast().is_none());
        let result = *session.apply_rain_text("109|12:00\n", 30, ForecastMode::Average);
        assert_eq!(result.intensity_mm, 1.0);
        assert_eq!(session.rain_forecast(), Some(&result));
    }
}
