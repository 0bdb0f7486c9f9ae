//! Glue between the client and a home automation host: reads the settings, creates
//! the devices and refreshes them on the host's heartbeat.

use crate::buienradar::Buienradar;
use crate::devices::{apply_updates, create_devices, observation_updates, rain_update, DeviceHost};
use crate::error::BuienradarError;
use crate::session::WeatherSession;
use crate::types::settings::PluginSettings;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info};
use std::collections::HashMap;

/// How often the host calls [`Plugin::on_heartbeat`].
pub const HEARTBEAT_SECONDS: u32 = 30;

/// The plugin instance the host talks to.
///
/// ```no_run
/// # use buienradar::{Buienradar, BuienradarError, DeviceHost, Plugin};
/// # use std::collections::HashMap;
/// # async fn run<H: DeviceHost>(host: &mut H) -> Result<(), BuienradarError> {
/// let params: HashMap<String, String> = [
///     ("Mode1", "52.095556"),
///     ("Mode2", "4.316389"),
///     ("Mode3", "15"),
///     ("Mode4", "True"),
///     ("Mode5", "True"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let mut plugin = Plugin::new(Buienradar::new()?);
/// plugin.on_start(host, &params, chrono::Utc::now()).await?;
/// plugin.on_heartbeat(host, chrono::Utc::now()).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Plugin {
    client: Buienradar,
    settings: Option<PluginSettings>,
    session: Option<WeatherSession>,
    retry_at: Option<DateTime<Utc>>,
}

impl Plugin {
    pub fn new(client: Buienradar) -> Self {
        Self {
            client,
            settings: None,
            session: None,
            retry_at: None,
        }
    }

    pub fn settings(&self) -> Option<&PluginSettings> {
        self.settings.as_ref()
    }

    pub fn session(&self) -> Option<&WeatherSession> {
        self.session.as_ref()
    }

    /// Reads the settings, creates the devices and does the first update.
    ///
    /// Only invalid settings fail the start. A failed first fetch is logged and
    /// retried on a later heartbeat.
    pub async fn on_start<H: DeviceHost>(
        &mut self,
        host: &mut H,
        params: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> Result<(), BuienradarError> {
        let settings = PluginSettings::from_parameters(params).map_err(|e| {
            error!("{}", e);
            e
        })?;
        info!(
            "Using location {:.4},{:.4}, updating every {} minutes",
            settings.home.lat(),
            settings.home.lon(),
            settings.interval_minutes
        );

        create_devices(host, &settings);
        self.session = Some(WeatherSession::new(settings.home, settings.interval_minutes));
        self.settings = Some(settings);
        self.retry_at = None;

        self.update(host, now).await;
        Ok(())
    }

    /// Refreshes the devices when the update interval has passed.
    pub async fn on_heartbeat<H: DeviceHost>(&mut self, host: &mut H, now: DateTime<Utc>) {
        let Some(session) = &self.session else {
            debug!("Heartbeat before a successful start, ignoring");
            return;
        };
        if let Some(retry_at) = self.retry_at {
            if now < retry_at {
                return;
            }
        }
        if session.need_update(now) {
            self.update(host, now).await;
        }
    }

    async fn update<H: DeviceHost>(&mut self, host: &mut H, now: DateTime<Utc>) {
        let (Some(settings), Some(session)) = (&self.settings, &mut self.session) else {
            return;
        };

        let weather = match self.client.fetch_catalog().await {
            Ok(catalog) => session.apply_catalog(&catalog, now).map(observation_updates),
            Err(e) => Err(e),
        };
        match weather {
            Ok(updates) => {
                apply_updates(host, &updates);
                self.retry_at = None;
            }
            Err(e) => {
                error!("Failed to update weather: {}", e);
                // The session isn't marked fresh, so wait an interval before trying again.
                self.retry_at = Some(now + Duration::minutes(i64::from(settings.interval_minutes)));
            }
        }

        match self.client.fetch_rain_text(session.home()).await {
            Ok(text) => {
                let forecast =
                    session.apply_rain_text(&text, settings.rain_timeframe_minutes, settings.rain_mode);
                apply_updates(host, &[rain_update(forecast)]);
            }
            Err(e) => error!("Failed to update rain forecast: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve, MemoryHost};

    const FEED: &str = include_str!("../data/buienradar.xml");
    const RAIN: &str = include_str!("../data/raintext.txt");

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn den_haag() -> HashMap<String, String> {
        params(&[
            ("Mode1", "52.095556"),
            ("Mode2", "4.316389"),
            ("Mode3", "15"),
            ("Mode4", "True"),
            ("Mode5", "True"),
        ])
    }

    fn client(base: &str) -> Buienradar {
        Buienradar::with_endpoints()
            .station_url(format!("{base}/feed"))
            .station_backup_url(format!("{base}/feed-backup"))
            .rain_url(format!("{base}/rain"))
            .call()
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_fills_devices() {
        let base = serve(vec![("/feed", FEED), ("/rain", RAIN)]).await;
        let mut plugin = Plugin::new(client(&base));
        let mut host = MemoryHost::default();

        plugin.on_start(&mut host, &den_haag(), Utc::now()).await.unwrap();

        assert_eq!(host.devices.keys().copied().collect::<Vec<_>>(), vec![3, 4, 6, 7]);
        assert_eq!(host.value(3), Some("13.6;82;3"));
        // Voorschoten has no pressure, De Bilt fills it in.
        assert_eq!(host.value(4), Some("1015.3;0"));
        assert_eq!(host.value(7), Some("1.91"));
        assert_eq!(
            plugin.session().unwrap().observation().unwrap().station.id,
            "6215"
        );
    }

    #[tokio::test]
    async fn test_backup_feed_is_used() {
        let base = serve(vec![("/feed-backup", FEED), ("/rain", RAIN)]).await;
        let mut plugin = Plugin::new(client(&base));
        let mut host = MemoryHost::default();

        plugin.on_start(&mut host, &den_haag(), Utc::now()).await.unwrap();
        assert_eq!(host.value(3), Some("13.6;82;3"));
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_start() {
        let mut plugin = Plugin::new(client("http://127.0.0.1:1"));
        let mut host = MemoryHost::default();
        let err = plugin
            .on_start(&mut host, &params(&[("Mode1", "52.1")]), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, BuienradarError::Settings(_)));
        assert!(host.devices.is_empty());

        // Nothing to do without settings.
        plugin.on_heartbeat(&mut host, Utc::now()).await;
        assert!(host.values.is_empty());
    }

    #[tokio::test]
    async fn test_offline_start_keeps_devices_empty() {
        let mut plugin = Plugin::new(client("http://127.0.0.1:1"));
        let mut host = MemoryHost::default();
        let start = Utc::now();

        plugin.on_start(&mut host, &den_haag(), start).await.unwrap();
        assert_eq!(host.devices.len(), 4);
        assert!(host.values.is_empty());
        assert_eq!(plugin.retry_at, Some(start + Duration::minutes(15)));

        // Throttled until an interval has passed.
        plugin.on_heartbeat(&mut host, start + Duration::seconds(30)).await;
        assert_eq!(plugin.retry_at, Some(start + Duration::minutes(15)));

        let later = start + Duration::minutes(16);
        plugin.on_heartbeat(&mut host, later).await;
        assert_eq!(plugin.retry_at, Some(later + Duration::minutes(15)));
        assert!(host.values.is_empty());
    }

    #[tokio::test]
    async fn test_heartbeat_respects_interval() {
        let base = serve(vec![("/feed", FEED), ("/rain", RAIN)]).await;
        let mut plugin = Plugin::new(client(&base));
        let mut host = MemoryHost::default();
        let start = Utc::now();
        plugin.on_start(&mut host, &den_haag(), start).await.unwrap();

        host.values.clear();
        plugin.on_heartbeat(&mut host, start + Duration::minutes(5)).await;
        assert!(host.values.is_empty());

        plugin.on_heartbeat(&mut host, start + Duration::minutes(16)).await;
        assert_eq!(host.value(6), Some("221.3;SW;54;81;13.6;13.6"));
        assert_eq!(
            plugin.session().unwrap().last_update(),
            Some(start + Duration::minutes(16))
        );
    }

    #[tokio::test]
    async fn test_existing_devices_are_not_recreated() {
        let base = serve(vec![("/feed", FEED), ("/rain", RAIN)]).await;
        let mut plugin = Plugin::new(client(&base));
        let mut host = MemoryHost::default();
        host.create_device(1, "Temperature", "Temperature");

        plugin.on_start(&mut host, &den_haag(), Utc::now()).await.unwrap();
        assert_eq!(host.devices.len(), 1);
        assert_eq!(host.value(1), Some("13.6"));
        assert!(host.value(7).is_none());
    }
}
