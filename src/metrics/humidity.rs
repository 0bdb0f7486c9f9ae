use serde::Serialize;

/// Comfort level for a humidity device, discriminants are the host's status codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum HumidityStatus {
    Normal = 0,
    Comfortable = 1,
    Dry = 2,
    Wet = 3,
}

impl HumidityStatus {
    /// Classifies relative humidity (%), using temperature (°C) for the comfortable band.
    ///
    /// Comfortable needs humidity within 35..=65 % and temperature within 22..=26 °C.
    /// Without a humidity reading the status is `Normal`.
    pub fn from_reading(humidity: Option<f64>, temperature: Option<f64>) -> Self {
        let Some(h) = humidity else {
            return HumidityStatus::Normal;
        };
        if h <= 30.0 {
            return HumidityStatus::Dry;
        }
        if h >= 70.0 {
            return HumidityStatus::Wet;
        }
        match temperature {
            Some(t) if (35.0..=65.0).contains(&h) && (22.0..=26.0).contains(&t) => {
                HumidityStatus::Comfortable
            }
            _ => HumidityStatus::Normal,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}
