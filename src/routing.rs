use crate::types::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Seam to the third-party routing API. Errors are already user-facing
/// display strings; callers show them inline and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteProvider: Send + Sync + 'static {
    async fn driving_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<Coordinates>, String>;
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: longitude first.
    coordinates: Vec<[f64; 2]>,
}

const ROUTE_NOT_FOUND: &str = "Rota bulunamadı";
const ROUTE_FAILED: &str = "Rota hesaplanırken hata oluştu";

#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("Failed to create HTTP client: {err}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn polyline(response: OsrmResponse) -> Result<Vec<Coordinates>, String> {
    if response.code != "Ok" {
        return Err(ROUTE_NOT_FOUND.into());
    }
    let Some(route) = response.routes.into_iter().next() else {
        return Err(ROUTE_NOT_FOUND.into());
    };

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[longitude, latitude]| Coordinates { latitude, longitude })
        .collect())
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn driving_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<Coordinates>, String> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        );

        let response = self.client.get(&url).send().await.map_err(|err| {
            warn!(?err, "Route request failed");
            ROUTE_FAILED.to_string()
        })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Route request rejected");
            return Err(ROUTE_FAILED.into());
        }

        let body: OsrmResponse = response.json().await.map_err(|err| {
            warn!(?err, "Malformed route response");
            ROUTE_FAILED.to_string()
        })?;

        polyline(body)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn polyline_swaps_geojson_coordinate_order() {
        let body = r#"{
            "code": "Ok",
            "routes": [{"geometry": {"coordinates": [[28.9784, 41.0082], [29.0280, 40.9908]]}}]
        }"#;
        let response: OsrmResponse = serde_json::from_str(body).unwrap();

        let coords = polyline(response).unwrap();
        assert_eq!(
            coords,
            vec![
                Coordinates { latitude: 41.0082, longitude: 28.9784 },
                Coordinates { latitude: 40.9908, longitude: 29.0280 },
            ]
        );
    }

    #[test]
    fn non_ok_codes_and_empty_routes_are_not_found() {
        let response: OsrmResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert_eq!(polyline(response).unwrap_err(), ROUTE_NOT_FOUND);

        let response: OsrmResponse = serde_json::from_str(r#"{"code": "Ok"}"#).unwrap();
        assert_eq!(polyline(response).unwrap_err(), ROUTE_NOT_FOUND);
    }
}
