use std::time::Duration;

use chrono::Local;
use tokio::time::sleep;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod availability;
mod configuration;
mod configuration_handler;
mod countdown;
mod http;
mod navigation;
mod opening_hours;
mod reminders;
mod routing;
mod seed;
mod store;
#[cfg(test)]
mod testutils;
mod types;

use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler, http::create_app,
    reminders::LocalReminders, routing::OsrmClient, store::BarberStore,
};

/// Appointment views are re-published at this cadence so streamed
/// countdowns keep shrinking.
const COUNTDOWN_REFRESH_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("##################");
    println!("# Barber Booking #");
    println!("##################");

    let configuration = ConfigurationHandler::parse_arguments();

    let store = BarberStore::new(LocalReminders::default());
    store.insert_example_barbers();

    let route_provider = match OsrmClient::new(
        &configuration.osrm_base_url(),
        configuration.request_timeout(),
    ) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build routing client: {err}");
            return;
        }
    };

    let refresher = store.clone();
    tokio::spawn(async move {
        loop {
            sleep(Duration::from_secs(COUNTDOWN_REFRESH_SECS)).await;
            refresher.publish(Local::now().naive_local());
        }
    });

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Listening on:\n{address}");
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = create_app(store, route_provider, configuration.user_coordinates());
    axum::serve(listener, app).await.unwrap();
}
