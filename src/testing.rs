//! Helpers shared by the unit tests.

use crate::devices::DeviceHost;
use axum::{routing::get, Router};
use std::collections::BTreeMap;
use tokio::net::TcpListener;

/// A host that keeps devices and their last values in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub devices: BTreeMap<u8, (String, String)>,
    pub values: BTreeMap<u8, (i64, String)>,
}

impl MemoryHost {
    pub fn value(&self, unit: u8) -> Option<&str> {
        self.values.get(&unit).map(|(_, s)| s.as_str())
    }
}

impl DeviceHost for MemoryHost {
    fn has_any_device(&self) -> bool {
        !self.devices.is_empty()
    }

    fn has_device(&self, unit: u8) -> bool {
        self.devices.contains_key(&unit)
    }

    fn create_device(&mut self, unit: u8, name: &str, type_name: &str) {
        self.devices
            .insert(unit, (name.to_string(), type_name.to_string()));
    }

    fn update_device(&mut self, unit: u8, n_value: i64, s_value: &str) {
        self.values.insert(unit, (n_value, s_value.to_string()));
    }
}

/// Serves fixed bodies by path on a random local port and returns the base url.
/// Unknown paths get a 404.
pub async fn serve(routes: Vec<(&'static str, &'static str)>) -> String {
    let app: Router = routes
        .into_iter()
        .fold(Router::new(), |app, (path, body)| {
            app.route(path, get(move || async move { body }))
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
