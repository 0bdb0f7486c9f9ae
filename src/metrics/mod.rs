//! Secondary indices derived from a station's readings. Everything here is pure and
//! total: absent input gives a defined answer, never an error.

pub mod barometer;
pub mod humidity;
pub mod wind;
