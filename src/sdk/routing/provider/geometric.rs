use crate::sdk::config::{positive, ConfigError};
use crate::sdk::routing::credential::Credential;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::route::{RouteResult, RouteSource};
use crate::sdk::routing::service::RoutingProvider;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Great-circle distance in kilometres on a sphere of the given radius.
pub fn haversine_km(start: GeoPoint, end: GeoPoint, earth_radius_km: f64) -> f64 {
    let lat1 = start.lat().to_radians();
    let lat2 = end.lat().to_radians();
    let delta_lat = (end.lat() - start.lat()).to_radians();
    let delta_lon = (end.lon() - start.lon()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    earth_radius_km * c
}

/// Straight-line estimate at an assumed average speed. Needs no network and
/// cannot fail, which makes it the floor of the resolver chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaversineProvider {
    speed_kmh: f64,
    earth_radius_km: f64,
}

impl Default for HaversineProvider {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl HaversineProvider {
    pub fn new(speed_kmh: f64, earth_radius_km: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            speed_kmh: positive("speed_kmh", speed_kmh)?,
            earth_radius_km: positive("earth_radius_km", earth_radius_km)?,
        })
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn estimate(&self, start: GeoPoint, end: GeoPoint) -> RouteResult {
        let distance_km = haversine_km(start, end, self.earth_radius_km);

        RouteResult {
            distance_km,
            duration_minutes: distance_km / self.speed_kmh * 60.0,
            geometry: vec![start.to_lat_lng(), end.to_lat_lng()],
            source: RouteSource::Geometric,
        }
    }
}

impl RoutingProvider for HaversineProvider {
    fn name(&self) -> &'static str {
        "haversine"
    }

    fn source(&self) -> RouteSource {
        RouteSource::Geometric
    }

    fn attempt(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        _credential: Option<&Credential>,
    ) -> Result<RouteResult, RoutingError> {
        Ok(self.estimate(start, end))
    }
}
