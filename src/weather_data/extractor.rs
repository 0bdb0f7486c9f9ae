use crate::types::observation::Observation;
use crate::types::station::{ResolvedStation, StationCatalog, StationRecord};
use crate::weather_data::error::WeatherDataError;
use chrono::{DateTime, Utc};
use log::debug;

/// De Bilt, the KNMI main station. It reports every reading, so missing pressure and
/// visibility are taken from here.
pub const REFERENCE_STATION_ID: &str = "6260";

/// Reads the station `station_id` from `catalog`, filling pressure and visibility from
/// `reference_id` when the station itself lacks them.
///
/// Returns a new record; the catalog is left as it was.
pub fn extract_station(
    catalog: &StationCatalog,
    station_id: &str,
    reference_id: &str,
) -> Result<StationRecord, WeatherDataError> {
    let station = catalog
        .station(station_id)
        .ok_or_else(|| WeatherDataError::StationNotFound(station_id.to_string()))?;

    let record = match catalog.station(reference_id) {
        Some(reference) if station.id != reference.id => {
            if station.pressure.is_none() || station.visibility.is_none() {
                debug!(
                    "Station {} lacks pressure or visibility, using reference station {}",
                    station.id, reference.id
                );
            }
            station.merged_with_reference(reference)
        }
        _ => station.clone(),
    };

    debug!("Temperature: {:?}", record.temperature);
    debug!("Wind Speed: {:?}", record.wind_speed);
    debug!("Wind Direction: {:?}", record.wind_bearing);
    debug!("Wind Speed Gusts: {:?}", record.wind_gusts);
    debug!("Pressure: {:?}", record.pressure);
    debug!("Humidity: {:?}", record.humidity);
    debug!("Visibility: {:?}", record.visibility);
    debug!("Solar Irradiance: {:?}", record.solar_irradiance);
    debug!("Rain Rate: {:?}", record.rain_rate);

    Ok(record)
}

/// Builds the observation for an already resolved station from a fresh catalog.
pub fn extract_observation(
    catalog: &StationCatalog,
    resolved: &ResolvedStation,
    fetched_at: DateTime<Utc>,
) -> Result<Observation, WeatherDataError> {
    let station = extract_station(catalog, &resolved.station.id, REFERENCE_STATION_ID)?;
    Ok(Observation {
        station,
        distance_km: resolved.distance_km,
        today_forecast: catalog.today_forecast.clone(),
        fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::catalog::parse_catalog;

    fn sample_catalog() -> StationCatalog {
        parse_catalog(include_str!("../../data/buienradar.xml")).unwrap()
    }

    #[test]
    fn test_fallback_fills_pressure_and_visibility() {
        let catalog = sample_catalog();
        let record = extract_station(&catalog, "6215", REFERENCE_STATION_ID).unwrap();
        assert_eq!(record.id, "6215");
        assert_eq!(record.temperature, Some(13.6));
        assert_eq!(record.pressure, Some(1015.3));
        assert_eq!(record.visibility, Some(25000.0));
        // Solar irradiance is absent at Voorschoten and is not substituted.
        assert_eq!(record.solar_irradiance, None);
        // The catalog keeps the station's own values.
        assert_eq!(catalog.station("6215").unwrap().pressure, None);
    }

    #[test]
    fn test_own_values_take_precedence() {
        let catalog = sample_catalog();
        let record = extract_station(&catalog, "6330", REFERENCE_STATION_ID).unwrap();
        assert_eq!(record.pressure, Some(1014.8));
        assert_eq!(record.visibility, Some(25000.0));
    }

    #[test]
    fn test_missing_reference_station() {
        let catalog = sample_catalog();
        let record = extract_station(&catalog, "6215", "9999").unwrap();
        assert_eq!(record.pressure, None);
        assert_eq!(record.visibility, None);
    }

    #[test]
    fn test_unknown_station() {
        let catalog = sample_catalog();
        assert!(matches!(
            extract_station(&catalog, "1234", REFERENCE_STATION_ID),
            Err(WeatherDataError::StationNotFound(id)) if id == "1234"
        ));
    }

    #[test]
    fn test_extract_observation() {
        let catalog = sample_catalog();
        let resolved = ResolvedStation {
            station: catalog.station("6215").unwrap().clone(),
            distance_km: 8.7,
        };
        let now = Utc::now();
        let observation = extract_observation(&catalog, &resolved, now).unwrap();
        assert_eq!(observation.station.pressure, Some(1015.3));
        assert_eq!(observation.distance_km, 8.7);
        assert_eq!(observation.fetched_at, now);
        assert!(observation.today_forecast.is_some());
        assert_eq!(observation.wind_direction(), "SW");
        assert_eq!(observation.barometer_forecast().code(), 0);
        assert_eq!(observation.humidity_status().code(), 3);
        // 13.6 °C is above the wind chill range.
        assert_eq!(observation.wind_chill(), Some(13.6));
    }
}
