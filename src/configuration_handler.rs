use crate::configuration::Configuration;
use crate::types::Coordinates;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "barber-booking", about = "In-memory barber appointment booking service")]
pub struct ConfigurationHandler {
    #[arg(long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "https://router.project-osrm.org")]
    osrm_base_url: String,

    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    /// Forced user location, matching the app's test coordinates.
    #[arg(long, default_value_t = 41.0082)]
    user_latitude: f64,

    #[arg(long, default_value_t = 28.9784)]
    user_longitude: f64,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn osrm_base_url(&self) -> String {
        self.osrm_base_url.clone()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn user_coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.user_latitude,
            longitude: self.user_longitude,
        }
    }
}
