use super::build_client;
use super::types::{normalize_route, DirectionsResponse};
use crate::sdk::routing::credential::Credential;
use crate::sdk::routing::error::{OrsErrorPayload, RoutingError};
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::route::{RouteResult, RouteSource};
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{try_acquire, Limiter};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde_json::json;
use std::time::Duration;

pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// OpenRouteService, the keyed primary tier.
pub struct RemoteOrsProvider {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl RemoteOrsProvider {
    pub fn new(timeout: Duration, limiter: Limiter) -> Result<Self, RoutingError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: ORS_BASE_URL.to_string(),
            limiter,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Sends one authorized request and returns the body of a 2xx response.
    /// Every ORS call takes a slot from the shared limiter first.
    pub(crate) fn execute(
        &self,
        request: RequestBuilder,
        credential: &Credential,
    ) -> Result<String, RoutingError> {
        try_acquire(&self.limiter).map_err(|retry_after| RoutingError::RateLimited { retry_after })?;

        let response = request
            .header(AUTHORIZATION, credential.expose())
            .send()
            .map_err(|e| {
                log::debug!("ORS request failed before a response arrived: {}", e);
                e
            })?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // Try to parse the structured error first
            if let Ok(payload) = serde_json::from_str::<OrsErrorPayload>(&text) {
                return Err(RoutingError::ApiError {
                    code: payload.error.code,
                    message: payload.error.message,
                });
            }
            log::error!(
                "API returned non-success status: {}. Unparseable Body: {}",
                status,
                text
            );
            return Err(RoutingError::RawApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

impl RoutingProvider for RemoteOrsProvider {
    fn name(&self) -> &'static str {
        "openrouteservice"
    }

    fn source(&self) -> RouteSource {
        RouteSource::Primary
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn attempt(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        credential: Option<&Credential>,
    ) -> Result<RouteResult, RoutingError> {
        let credential = credential.ok_or(RoutingError::MissingCredential)?;

        log::debug!(
            "[PROVIDER] Calling remote get_directions for {} -> {}",
            start,
            end
        );
        let url = self.url("/v2/directions/driving-car/geojson");
        let body = json!({
            "coordinates": [start.lon_lat(), end.lon_lat()],
            "instructions": false,
        });

        let text = self.execute(self.client.post(&url).json(&body), credential)?;

        let route_response: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        let feature = route_response
            .features
            .first()
            .ok_or(RoutingError::NoRoute)?;

        normalize_route(
            feature.properties.summary.distance,
            feature.properties.summary.duration,
            &feature.geometry,
            RouteSource::Primary,
        )
    }
}
