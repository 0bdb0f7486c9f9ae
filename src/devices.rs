//! The devices the plugin publishes on the host platform and how readings are
//! formatted for them.

use crate::types::forecast::ForecastResult;
use crate::types::observation::Observation;
use crate::types::settings::PluginSettings;
use log::{debug, info};

/// What the plugin needs from the home automation host.
pub trait DeviceHost {
    /// Whether this plugin already has any device on the host.
    fn has_any_device(&self) -> bool;

    fn has_device(&self, unit: u8) -> bool;

    fn create_device(&mut self, unit: u8, name: &str, type_name: &str);

    fn update_device(&mut self, unit: u8, n_value: i64, s_value: &str);
}

/// Device unit numbers. They are stable so updates can address devices directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceUnit {
    Temperature = 1,
    Humidity = 2,
    TemperatureHumidity = 3,
    Barometer = 4,
    Wind = 5,
    WindChill = 6,
    RainForecast = 7,
}

impl DeviceUnit {
    pub fn unit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceUnit::Temperature | DeviceUnit::TemperatureHumidity => "Temperature",
            DeviceUnit::Humidity => "Humidity",
            DeviceUnit::Barometer => "Barometer",
            DeviceUnit::Wind | DeviceUnit::WindChill => "Wind",
            DeviceUnit::RainForecast => "Rain forecast",
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            DeviceUnit::Temperature => "Temperature",
            DeviceUnit::Humidity => "Humidity",
            DeviceUnit::TemperatureHumidity => "Temp+Hum",
            DeviceUnit::Barometer => "Barometer",
            DeviceUnit::Wind => "Wind",
            DeviceUnit::WindChill => "Wind+Temp+Chill",
            DeviceUnit::RainForecast => "Custom",
        }
    }
}

/// A value to push to one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceUpdate {
    pub unit: DeviceUnit,
    pub n_value: i64,
    pub s_value: String,
}

impl DeviceUpdate {
    fn new(unit: DeviceUnit, n_value: i64, s_value: String) -> Self {
        Self {
            unit,
            n_value,
            s_value,
        }
    }
}

/// The units to create for the given settings.
pub fn device_layout(settings: &PluginSettings) -> Vec<DeviceUnit> {
    let mut units = Vec::with_capacity(4);
    if settings.combined_temperature_humidity {
        units.push(DeviceUnit::TemperatureHumidity);
    } else {
        units.push(DeviceUnit::Temperature);
        units.push(DeviceUnit::Humidity);
    }
    units.push(DeviceUnit::Barometer);
    units.push(if settings.include_wind_chill {
        DeviceUnit::WindChill
    } else {
        DeviceUnit::Wind
    });
    units.push(DeviceUnit::RainForecast);
    units
}

/// Creates the devices, but only when the host has none of ours. If some exist the
/// user may have deleted others on purpose.
pub fn create_devices<H: DeviceHost>(host: &mut H, settings: &PluginSettings) {
    if host.has_any_device() {
        return;
    }
    for unit in device_layout(settings) {
        host.create_device(unit.unit(), unit.name(), unit.type_name());
    }
    info!("Devices created.");
}

/// Formats the observation for every device it has the readings for.
///
/// Devices whose readings are missing are left out, so they keep their last value.
pub fn observation_updates(observation: &Observation) -> Vec<DeviceUpdate> {
    let s = &observation.station;
    let humidity_code = observation.humidity_status().code();
    let mut updates = Vec::new();

    if let Some(t) = s.temperature {
        updates.push(DeviceUpdate::new(DeviceUnit::Temperature, 0, format!("{t:.1}")));
    }

    if let Some(h) = s.humidity {
        updates.push(DeviceUpdate::new(
            DeviceUnit::Humidity,
            h.round() as i64,
            humidity_code.to_string(),
        ));
        if let Some(t) = s.temperature {
            updates.push(DeviceUpdate::new(
                DeviceUnit::TemperatureHumidity,
                0,
                format!("{t:.1};{h:.0};{humidity_code}"),
            ));
        }
    }

    if let Some(p) = s.pressure {
        updates.push(DeviceUpdate::new(
            DeviceUnit::Barometer,
            0,
            format!("{p:.1};{}", observation.barometer_forecast().code()),
        ));
    }

    // The host wants wind speeds in 0.1 m/s.
    if let (Some(bearing), Some(speed), Some(gusts)) = (s.wind_bearing, s.wind_speed, s.wind_gusts)
    {
        let wind = format!(
            "{};{};{};{}",
            bearing,
            observation.wind_direction(),
            (speed * 10.0).round() as i64,
            (gusts * 10.0).round() as i64
        );
        updates.push(DeviceUpdate::new(DeviceUnit::Wind, 0, format!("{wind};0;0")));

        if let (Some(t), Some(chill)) = (s.temperature, observation.wind_chill()) {
            updates.push(DeviceUpdate::new(
                DeviceUnit::WindChill,
                0,
                format!("{wind};{t:.1};{chill:.1}"),
            ));
        }
    }

    updates
}

pub fn rain_update(forecast: &ForecastResult) -> DeviceUpdate {
    DeviceUpdate::new(
        DeviceUnit::RainForecast,
        0,
        format!("{:.2}", forecast.intensity_mm),
    )
}

/// Pushes updates to the host, skipping units it doesn't have.
pub fn apply_updates<H: DeviceHost>(host: &mut H, updates: &[DeviceUpdate]) {
    for update in updates {
        let unit = update.unit.unit();
        // Devices can be deleted by the user or never created.
        if !host.has_device(unit) {
            continue;
        }
        host.update_device(unit, update.n_value, &update.s_value);
        debug!(
            "Update {}:'{}' ({})",
            update.n_value,
            update.s_value,
            update.unit.name()
        );
    }
}
