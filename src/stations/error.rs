use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateStationError {
    #[error("No weather stations available to choose from")]
    EmptyCatalog,

    #[error("None of the weather stations reports a temperature")]
    NoTemperatureStations,

    // Buienradar only covers The Netherlands
    #[error("Nearest station '{station}' is {distance_km:.1} km away, the location is outside of The Netherlands")]
    TooFarAway { station: String, distance_km: f64 },
}
