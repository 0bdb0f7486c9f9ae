use crate::stations::error::LocateStationError;
use crate::types::station::{LatLon, ResolvedStation, StationRecord};
use log::{debug, warn};
use ordered_float::OrderedFloat;

/// Earth radius used for great-circle distances, in km.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Stations further away than this mean the home location is outside of The Netherlands.
pub const MAX_STATION_DISTANCE_KM: f64 = 100.0;

/// Great-circle distance between two points in km, using the haversine formula.
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let (lat1, lon1) = (a.lat().to_radians(), a.lon().to_radians());
    let (lat2, lon2) = (b.lat().to_radians(), b.lon().to_radians());

    let dlat = (lat2 - lat1).abs();
    let dlon = (lon2 - lon1).abs();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    c * EARTH_RADIUS_KM
}

/// Finds the station nearest to a fixed home location.
#[derive(Debug, Clone, Copy)]
pub struct StationLocator {
    home: LatLon,
    max_distance_km: f64,
}

impl StationLocator {
    pub fn new(home: LatLon) -> Self {
        Self {
            home,
            max_distance_km: MAX_STATION_DISTANCE_KM,
        }
    }

    pub fn home(&self) -> LatLon {
        self.home
    }

    /// Returns the station nearest to home among those that report a temperature.
    ///
    /// Stations without a temperature are skipped entirely, many of them only
    /// measure wind. On equal distances the station that comes first in `stations`
    /// wins. A nearest station beyond [`MAX_STATION_DISTANCE_KM`] is an error, not a
    /// result.
    pub fn nearest(&self, stations: &[StationRecord]) -> Result<ResolvedStation, LocateStationError> {
        if stations.is_empty() {
            return Err(LocateStationError::EmptyCatalog);
        }

        // min_by_key keeps the first of equally small keys.
        let (station, distance_km) = stations
            .iter()
            .filter(|s| s.temperature.is_some())
            .map(|s| (s, haversine_km(self.home, s.location())))
            .min_by_key(|(_, d)| OrderedFloat(*d))
            .ok_or(LocateStationError::NoTemperatureStations)?;

        debug!(
            "Nearest station to {:?} is {} ({}) at {:.1} km",
            self.home, station.name, station.id, distance_km
        );

        if distance_km > self.max_distance_km {
            warn!(
                "Nearest station {} is {:.1} km away, this only works for locations within The Netherlands",
                station.name, distance_km
            );
            return Err(LocateStationError::TooFarAway {
                station: station.id.clone(),
                distance_km,
            });
        }

        Ok(ResolvedStation {
            station: station.clone(),
            distance_km,
        })
    }
}
