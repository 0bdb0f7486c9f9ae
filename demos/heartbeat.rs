//! Runs the plugin against the live buienradar feed with a host that just logs.
//!
//! cargo run --example heartbeat -- 52.095556 4.316389

use buienradar::{Buienradar, BuienradarError, DeviceHost, Plugin, HEARTBEAT_SECONDS};
use chrono::Utc;
use log::info;
use std::collections::{BTreeSet, HashMap};
use std::env;
use std::time::Duration;

#[derive(Default)]
struct LogHost {
    units: BTreeSet<u8>,
}

impl DeviceHost for LogHost {
    fn has_any_device(&self) -> bool {
        !self.units.is_empty()
    }

    fn has_device(&self, unit: u8) -> bool {
        self.units.contains(&unit)
    }

    fn create_device(&mut self, unit: u8, name: &str, type_name: &str) {
        info!("Create unit {}: {} ({})", unit, name, type_name);
        self.units.insert(unit);
    }

    fn update_device(&mut self, unit: u8, n_value: i64, s_value: &str) {
        info!("Unit {} = {};'{}'", unit, n_value, s_value);
    }
}

#[tokio::main]
async fn main() -> Result<(), BuienradarError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let params: HashMap<String, String> = [
        ("Mode1", args.get(1).map_or("52.095556", String::as_str)),
        ("Mode2", args.get(2).map_or("4.316389", String::as_str)),
        ("Mode3", "10"),
        ("Mode4", "True"),
        ("Mode5", "True"),
        ("Mode6", "30"),
        ("Mode7", "average"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut host = LogHost::default();
    let mut plugin = Plugin::new(Buienradar::new()?);
    plugin.on_start(&mut host, &params, Utc::now()).await?;

    let mut heartbeat = tokio::time::interval(Duration::from_secs(u64::from(HEARTBEAT_SECONDS)));
    // The first tick completes immediately.
    heartbeat.tick().await;
    loop {
        heartbeat.tick().await;
        plugin.on_heartbeat(&mut host, Utc::now()).await;
    }
}
