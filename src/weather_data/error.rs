use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Both {primary} and backup {backup} failed")]
    SourcesExhausted {
        primary: String,
        backup: String,
        #[source]
        source: Box<WeatherDataError>,
    },

    #[error("Failed to read weather data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse weather station XML")]
    XmlParse(#[from] quick_xml::DeError),

    #[error("Station '{0}' is not present in the weather data")]
    StationNotFound(String),
}
