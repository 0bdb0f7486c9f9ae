use crate::metrics::barometer::BarometerForecast;
use crate::metrics::humidity::HumidityStatus;
use crate::metrics::wind::{compass_direction, wind_chill};
use crate::types::station::{StationRecord, TodayForecast};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The current weather at home: the nearest station's readings, with pressure and
/// visibility from the reference station where the nearest one lacks them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub station: StationRecord,
    pub distance_km: f64,
    pub today_forecast: Option<TodayForecast>,
    pub fetched_at: DateTime<Utc>,
}

impl Observation {
    pub fn wind_chill(&self) -> Option<f64> {
        wind_chill(self.station.temperature, self.station.wind_speed)
    }

    pub fn wind_direction(&self) -> &'static str {
        compass_direction(self.station.wind_bearing)
    }

    pub fn barometer_forecast(&self) -> BarometerForecast {
        BarometerForecast::from_pressure(self.station.pressure)
    }

    pub fn humidity_status(&self) -> HumidityStatus {
        HumidityStatus::from_reading(self.station.humidity, self.station.temperature)
    }
}
