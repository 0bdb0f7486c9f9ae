//! Reads a saved buienradar feed and prints what the plugin would show for a location.
//!
//! cargo run --example local_test -- data/buienradar.xml 52.095556 4.316389

use buienradar::{observation_updates, Buienradar, BuienradarError, LatLon, WeatherSession};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), BuienradarError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let args: Vec<String> = env::args().collect();
    let path = PathBuf::from(args.get(1).map_or("data/buienradar.xml", String::as_str));
    let lat = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(52.095556);
    let lon = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(4.316389);

    let client = Buienradar::new()?;
    let mut session = WeatherSession::new(LatLon(lat, lon), 15);
    let observation = client.refresh_from_file(&path, &mut session).await?;

    println!(
        "{} ({:.1} km): {:?} °C, {:?} % humidity, {:?} hPa",
        observation.station.name,
        observation.distance_km,
        observation.station.temperature,
        observation.station.humidity,
        observation.station.pressure
    );
    println!(
        "Wind {} {:?} m/s, gusts {:?} m/s, chill {:?} °C",
        observation.wind_direction(),
        observation.station.wind_speed,
        observation.station.wind_gusts,
        observation.wind_chill()
    );
    println!(
        "Barometer {:?}, humidity {:?}",
        observation.barometer_forecast(),
        observation.humidity_status()
    );
    if let Some(summary) = observation
        .today_forecast
        .as_ref()
        .and_then(|f| f.summary.as_ref())
    {
        println!("Today: {summary}");
    }

    for update in observation_updates(observation) {
        println!("Unit {}: {};'{}'", update.unit.unit(), update.n_value, update.s_value);
    }

    Ok(())
}
