use crate::weather_data::error::WeatherDataError;
use log::{error, info};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("buienradar-rs/", env!("CARGO_PKG_VERSION"));

/// Downloads feed documents as text, trying a backup URL when the primary one fails.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .gzip(true)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body, non-success status codes count as failure.
    pub async fn fetch(&self, url: &str) -> Result<String, WeatherDataError> {
        info!("Retrieve weather data from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))
    }

    /// Fetches `primary`, falling back to `backup` once. No retries beyond that.
    pub async fn fetch_with_fallback(
        &self,
        primary: &str,
        backup: &str,
    ) -> Result<String, WeatherDataError> {
        match self.fetch(primary).await {
            Ok(body) => Ok(body),
            Err(e) => {
                error!("HTTP error: {} URL: {}", e, primary);
                info!("Going to try another Buienradar URL");
                self.fetch(backup).await.map_err(|backup_err| {
                    error!("HTTP error: {} URL: {}", backup_err, backup);
                    WeatherDataError::SourcesExhausted {
                        primary: primary.to_string(),
                        backup: backup.to_string(),
                        source: Box::new(backup_err),
                    }
                })
            }
        }
    }
}

/// Reads a previously saved feed document from disk.
pub async fn load_file(path: &Path) -> Result<String, WeatherDataError> {
    info!("Load weather data from {}", path.display());
    fs::read_to_string(path)
        .await
        .map_err(|e| WeatherDataError::FileRead(path.to_path_buf(), e))
}
