//! Parses the buienradar XML feed into a [`StationCatalog`].

use crate::types::station::{StationCatalog, StationRecord, TodayForecast};
use crate::utils::parse_opt_float;
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDateTime;
use log::{debug, warn};
use quick_xml::de::from_str;
use serde::Deserialize;

const FEED_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// XML structure for deserialization. Numeric values stay text here, the feed uses
/// `-` for readings a station doesn't have.
#[derive(Debug, Deserialize)]
struct XmlFeed {
    weergegevens: XmlWeatherData,
}

#[derive(Debug, Deserialize)]
struct XmlWeatherData {
    #[serde(default)]
    actueel_weer: XmlCurrentWeather,
    verwachting_vandaag: Option<XmlTodayForecast>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlCurrentWeather {
    #[serde(default)]
    weerstations: XmlStations,
}

#[derive(Debug, Default, Deserialize)]
struct XmlStations {
    #[serde(rename = "weerstation", default)]
    stations: Vec<XmlStation>,
}

#[derive(Debug, Deserialize)]
struct XmlStation {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "stationnaam")]
    name: Option<XmlStationName>,
    #[serde(rename = "latGraden")]
    lat: Option<String>,
    #[serde(rename = "lonGraden")]
    lon: Option<String>,
    #[serde(rename = "datum")]
    date: Option<String>,
    #[serde(rename = "temperatuurGC")]
    temperature: Option<String>,
    #[serde(rename = "windsnelheidMS")]
    wind_speed: Option<String>,
    #[serde(rename = "windrichtingGR")]
    wind_bearing: Option<String>,
    #[serde(rename = "windstotenMS")]
    wind_gusts: Option<String>,
    #[serde(rename = "luchtdruk")]
    pressure: Option<String>,
    #[serde(rename = "luchtvochtigheid")]
    humidity: Option<String>,
    #[serde(rename = "zichtmeters")]
    visibility: Option<String>,
    #[serde(rename = "zonintensiteitWM2")]
    solar_irradiance: Option<String>,
    #[serde(rename = "regenMMPU")]
    rain_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlStationName {
    #[serde(rename = "@regio")]
    region: Option<String>,
    #[serde(rename = "$text", default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct XmlTodayForecast {
    #[serde(rename = "tijdweerbericht")]
    published_at: Option<String>,
    #[serde(rename = "samenvatting")]
    summary: Option<String>,
    #[serde(rename = "tekst")]
    text: Option<String>,
}

impl XmlStation {
    /// Converts to a [`StationRecord`]. Returns `None` when the station has no id or no
    /// usable position.
    fn into_record(self) -> Option<StationRecord> {
        let Some(id) = non_empty(self.id) else {
            warn!("Skipping station without an id");
            return None;
        };
        let (Some(lat), Some(lon)) = (
            parse_opt_float(self.lat.as_deref()),
            parse_opt_float(self.lon.as_deref()),
        ) else {
            warn!("Skipping station {}: no valid coordinates", id);
            return None;
        };

        let (name, region) = match self.name {
            Some(n) => (n.name.trim().to_string(), n.region.filter(|r| !r.is_empty())),
            None => (id.clone(), None),
        };

        Some(StationRecord {
            observed_at: self.date.as_deref().and_then(parse_feed_datetime),
            temperature: parse_opt_float(self.temperature.as_deref()),
            wind_speed: parse_opt_float(self.wind_speed.as_deref()),
            wind_bearing: parse_opt_float(self.wind_bearing.as_deref()),
            wind_gusts: parse_opt_float(self.wind_gusts.as_deref()),
            pressure: parse_opt_float(self.pressure.as_deref()),
            humidity: parse_opt_float(self.humidity.as_deref()),
            visibility: parse_opt_float(self.visibility.as_deref()),
            solar_irradiance: parse_opt_float(self.solar_irradiance.as_deref()),
            rain_rate: parse_opt_float(self.rain_rate.as_deref()),
            region,
            ..StationRecord::new(id, name, lat, lon)
        })
    }
}

fn parse_feed_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), FEED_DATETIME_FORMAT).ok()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses the buienradar XML document.
///
/// Stations keep their document order, which the resolver relies on for tie-breaking.
/// Individual readings that aren't numbers become `None`; only a document that isn't
/// the expected XML fails.
pub fn parse_catalog(xml: &str) -> Result<StationCatalog, WeatherDataError> {
    let feed: XmlFeed = from_str(xml)?;

    let stations: Vec<StationRecord> = feed
        .weergegevens
        .actueel_weer
        .weerstations
        .stations
        .into_iter()
        .filter_map(XmlStation::into_record)
        .collect();

    let today_forecast = feed.weergegevens.verwachting_vandaag.map(|f| TodayForecast {
        published_at: f.published_at.as_deref().and_then(parse_feed_datetime),
        summary: non_empty(f.summary),
        text: non_empty(f.text),
    });

    debug!("Parsed {} weather stations", stations.len());
    Ok(StationCatalog {
        stations,
        today_forecast,
    })
}
