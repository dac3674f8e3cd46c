use super::build_client;
use super::types::{normalize_route, OsrmResponse};
use crate::sdk::routing::credential::Credential;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::route::{RouteResult, RouteSource};
use crate::sdk::routing::service::RoutingProvider;
use reqwest::blocking::Client;
use std::time::Duration;

pub const OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Public OSRM demo server, the keyless secondary tier.
pub struct OsrmProvider {
    client: Client,
    base_url: String,
}

impl OsrmProvider {
    pub fn new(timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: OSRM_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl RoutingProvider for OsrmProvider {
    fn name(&self) -> &'static str {
        "osrm"
    }

    fn source(&self) -> RouteSource {
        RouteSource::Secondary
    }

    fn attempt(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        _credential: Option<&Credential>,
    ) -> Result<RouteResult, RoutingError> {
        let url = format!("{}/route/v1/driving/{};{}", self.base_url, start, end);
        log::debug!("[PROVIDER] Calling OSRM route: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // OSRM reports bad queries as JSON with a non-Ok code.
            if let Ok(body) = serde_json::from_str::<OsrmResponse>(&text) {
                return Err(RoutingError::Rejected {
                    code: body.code,
                    message: body.message.unwrap_or_else(|| status.to_string()),
                });
            }
            return Err(RoutingError::RawApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: OsrmResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse OsrmResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        if body.code != "Ok" {
            return Err(RoutingError::Rejected {
                message: body.message.unwrap_or_else(|| body.code.clone()),
                code: body.code,
            });
        }

        let route = body.routes.first().ok_or(RoutingError::NoRoute)?;
        normalize_route(
            route.distance,
            route.duration,
            &route.geometry,
            RouteSource::Secondary,
        )
    }
}
