use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::point::{GeoPoint, LatLng};
use crate::sdk::routing::route::{RouteResult, RouteSource};
use serde::Deserialize;

// --- ORS /v2/directions/{profile}/geojson ---

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    pub features: Vec<RouteFeature>,
}
#[derive(Deserialize, Debug)]
pub struct RouteFeature {
    #[serde(default)]
    pub properties: RouteProperties,
    pub geometry: LineString,
}
#[derive(Deserialize, Debug, Default)]
pub struct RouteProperties {
    #[serde(default)]
    pub summary: DirectionsSummary,
}
// ORS leaves out distance and duration for zero-length routes.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct DirectionsSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

// --- OSRM /route/v1/{profile}/{coordinates} ---

#[derive(Deserialize, Debug)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}
#[derive(Deserialize, Debug)]
pub struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,
    pub geometry: LineString,
}

/// GeoJSON LineString body; positions are `[lon, lat, (elevation)]`.
#[derive(Deserialize, Debug)]
pub struct LineString {
    pub coordinates: Vec<Vec<f64>>,
}

/// Converts an upstream route (metres, seconds, lon/lat path) into a
/// [`RouteResult`], rejecting values no real route can have.
pub fn normalize_route(
    distance_m: f64,
    duration_s: f64,
    path: &LineString,
    source: RouteSource,
) -> Result<RouteResult, RoutingError> {
    if !(distance_m.is_finite() && distance_m >= 0.0) {
        return Err(RoutingError::Malformed(format!(
            "distance must be a non-negative number, got {}",
            distance_m
        )));
    }
    if !(duration_s.is_finite() && duration_s >= 0.0) {
        return Err(RoutingError::Malformed(format!(
            "duration must be a non-negative number, got {}",
            duration_s
        )));
    }

    let geometry = path
        .coordinates
        .iter()
        .map(|position| swap_position(position))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteResult {
        distance_km: distance_m / 1000.0,
        duration_minutes: duration_s / 60.0,
        geometry,
        source,
    })
}

fn swap_position(position: &[f64]) -> Result<LatLng, RoutingError> {
    match position {
        [lon, lat, ..] => GeoPoint::new(*lon, *lat)
            .map(GeoPoint::to_lat_lng)
            .map_err(|e| RoutingError::Malformed(e.to_string())),
        _ => Err(RoutingError::Malformed(format!(
            "position needs at least two values, got {:?}",
            position
        ))),
    }
}
