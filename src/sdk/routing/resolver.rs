use super::credential::Credential;
use super::error::{ResolveError, RoutingError};
use super::point::GeoPoint;
use super::provider::{HaversineProvider, OsrmProvider, RemoteOrsProvider};
use super::route::RouteResult;
use super::service::RoutingProvider;
use crate::sdk::config::{positive, ConfigError, ResolverConfig};
use crate::sdk::util::rate_limit::ors_limiter;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build provider: {0}")]
    Provider(#[from] RoutingError),
}

/// Tries providers in order and returns the first route any of them produces.
///
/// Provider failures never reach the caller. They are logged and the next
/// tier is tried; when the list is exhausted the built-in haversine estimate
/// answers, so resolving valid points always yields a route.
pub struct RouteResolver {
    providers: Vec<Box<dyn RoutingProvider>>,
    floor: HaversineProvider,
}

impl RouteResolver {
    pub fn new(providers: Vec<Box<dyn RoutingProvider>>, floor: HaversineProvider) -> Self {
        Self { providers, floor }
    }

    /// The standard chain: OpenRouteService, then OSRM, then haversine.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, BuildError> {
        positive("ROUTE_TIMEOUT_SECS", config.timeout.as_secs_f64())?;
        let floor = HaversineProvider::new(config.speed_kmh, config.earth_radius_km)?;

        let primary = RemoteOrsProvider::new(
            config.timeout,
            ors_limiter(config.ors_requests_per_minute),
        )?
        .with_base_url(config.ors_base_url.as_str());
        let secondary =
            OsrmProvider::new(config.timeout)?.with_base_url(config.osrm_base_url.as_str());

        let providers: Vec<Box<dyn RoutingProvider>> =
            vec![Box::new(primary), Box::new(secondary), Box::new(floor)];
        Ok(Self::new(providers, floor))
    }

    /// No network tiers at all.
    pub fn offline(floor: HaversineProvider) -> Self {
        Self::new(vec![Box::new(floor)], floor)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn resolve(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        credential: Option<&Credential>,
    ) -> RouteResult {
        for provider in &self.providers {
            if provider.requires_credential() && credential.is_none() {
                log::debug!(
                    "[RESOLVER] provider={} outcome=skipped reason=no credential",
                    provider.name()
                );
                continue;
            }

            let started = Instant::now();
            match provider
                .attempt(start, end, credential)
                .and_then(RouteResult::checked)
            {
                Ok(mut route) => {
                    log::info!(
                        "[RESOLVER] provider={} outcome=success elapsed_ms={} distance_km={:.3} duration_min={:.2}",
                        provider.name(),
                        started.elapsed().as_millis(),
                        route.distance_km,
                        route.duration_minutes
                    );
                    route.source = provider.source();
                    return route.pin_endpoints(start, end);
                }
                Err(err) => {
                    log::warn!(
                        "[RESOLVER] provider={} outcome=failure elapsed_ms={} timeout={} reason={}",
                        provider.name(),
                        started.elapsed().as_millis(),
                        err.is_timeout(),
                        err
                    );
                }
            }
        }

        log::warn!("[RESOLVER] every provider failed, using straight-line estimate");
        self.floor.estimate(start, end)
    }

    /// Round trip through `via`: both legs are resolved independently and
    /// summed. The result is tagged with the less accurate leg's tier.
    pub fn resolve_via(
        &self,
        start: GeoPoint,
        via: GeoPoint,
        end: GeoPoint,
        credential: Option<&Credential>,
    ) -> RouteResult {
        let outbound = self.resolve(start, via, credential);
        let inbound = self.resolve(via, end, credential);
        outbound.join(inbound)
    }

    /// Validates raw (lon, lat) pairs and resolves them. Invalid input is the
    /// only error this can return.
    pub fn resolve_coords(
        &self,
        start: (f64, f64),
        end: (f64, f64),
        credential: Option<&Credential>,
    ) -> Result<RouteResult, ResolveError> {
        let start = GeoPoint::new(start.0, start.1)?;
        let end = GeoPoint::new(end.0, end.1)?;
        Ok(self.resolve(start, end, credential))
    }
}
