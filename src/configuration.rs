use crate::types::Coordinates;
use std::time::Duration;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    fn osrm_base_url(&self) -> String;
    fn request_timeout(&self) -> Duration;
    /// Origin used for route requests. Defaults to a fixed test location
    /// since there is no device geolocation in this environment.
    fn user_coordinates(&self) -> Coordinates;
}
