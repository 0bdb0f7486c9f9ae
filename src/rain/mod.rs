pub mod forecast;

use crate::types::station::LatLon;
use crate::utils::round_to;

/// Rain text endpoints for a location, primary first. Buienradar wants the
/// coordinates with 2 decimals.
pub fn rain_urls(home: LatLon) -> (String, String) {
    let lat = round_to(home.lat(), 2);
    let lon = round_to(home.lon(), 2);
    (
        format!("https://gps.buienradar.nl/getrr.php?lat={lat}&lon={lon}"),
        format!("http://gadgets.buienradar.nl/data/raintext?lat={lat}&lon={lon}"),
    )
}
