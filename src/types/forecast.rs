//! Types describing the short-range precipitation nowcast.

use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the per-sample rain intensities are summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ForecastMode {
    /// Mean intensity over the timeframe.
    #[default]
    Average,
    /// Peak intensity over the timeframe.
    Maximum,
}

impl Display for ForecastMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMode::Average => write!(f, "average"),
            ForecastMode::Maximum => write!(f, "max"),
        }
    }
}

impl FromStr for ForecastMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "avg" => Ok(ForecastMode::Average),
            "max" | "maximum" => Ok(ForecastMode::Maximum),
            other => Err(other.to_string()),
        }
    }
}

/// One 5-minute bucket of the nowcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastSample {
    /// Intensity code, 0 to 255.
    pub intensity_code: u8,
    /// Time of day label as published (`HH:MM`), only for display.
    pub label: String,
}

impl ForecastSample {
    /// Converts the intensity code to mm/hour: `10^((code - 109) / 32)`, with 0 meaning dry.
    pub fn millimeters_per_hour(&self) -> f64 {
        if self.intensity_code == 0 {
            0.0
        } else {
            10f64.powf((f64::from(self.intensity_code) - 109.0) / 32.0)
        }
    }
}

/// Summary of the nowcast over the requested timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastResult {
    pub mode: ForecastMode,
    /// Average or maximum mm/hour depending on `mode`, rounded to 2 decimals.
    pub intensity_mm: f64,
    /// Mean intensity code rounded up.
    pub average_code: u8,
    /// Expected rainfall over the timeframe in mm, rounded to 1 decimal.
    pub expected_total_mm: f64,
    pub timeframe_minutes: u32,
    /// Number of samples the figures are based on.
    pub samples: usize,
}

impl ForecastResult {
    pub fn empty(mode: ForecastMode, timeframe_minutes: u32) -> Self {
        Self {
            mode,
            intensity_mm: 0.0,
            average_code: 0,
            expected_total_mm: 0.0,
            timeframe_minutes,
            samples: 0,
        }
    }
}
