//! Shared fixtures for the provider and resolver integration tests.
#![allow(dead_code)]

use campus_route::{Credential, GeoPoint, ResolverConfig, RouteResolver, RouteResult};
use serde_json::{json, Value};
use std::time::Duration;

pub const API_KEY: &str = "test-key";

/// Pickup point in front of a hostel and the campus hospital, (lon, lat).
pub fn campus_trip() -> (GeoPoint, GeoPoint) {
    (
        GeoPoint::new(72.9133, 19.1334).unwrap(),
        GeoPoint::new(72.9146062, 19.1309507).unwrap(),
    )
}

/// Road path between the two campus points in GeoJSON (lon, lat) order.
pub fn campus_path() -> Value {
    json!([[72.9133, 19.1334], [72.9140, 19.1320], [72.9146062, 19.1309507]])
}

pub fn ors_body(distance_m: f64, duration_s: f64, coordinates: Value) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "summary": { "distance": distance_m, "duration": duration_s }
            },
            "geometry": { "type": "LineString", "coordinates": coordinates }
        }]
    })
}

pub fn osrm_body(distance_m: f64, duration_s: f64, coordinates: Value) -> Value {
    json!({
        "code": "Ok",
        "routes": [{
            "distance": distance_m,
            "duration": duration_s,
            "geometry": { "type": "LineString", "coordinates": coordinates }
        }],
        "waypoints": []
    })
}

pub fn config_for(ors_url: &str, osrm_url: &str, timeout: Duration) -> ResolverConfig {
    ResolverConfig {
        ors_base_url: ors_url.to_string(),
        osrm_base_url: osrm_url.to_string(),
        timeout,
        ..ResolverConfig::default()
    }
}

/// Builds the standard chain and resolves on a blocking thread; the
/// blocking HTTP client must not be created or dropped on the runtime.
pub async fn resolve_blocking(config: ResolverConfig, api_key: Option<&'static str>) -> RouteResult {
    tokio::task::spawn_blocking(move || {
        let (start, end) = campus_trip();
        let resolver = RouteResolver::from_config(&config).unwrap();
        let credential = api_key.and_then(Credential::new);
        resolver.resolve(start, end, credential.as_ref())
    })
    .await
    .unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Endpoint and range invariants every resolved route must satisfy.
pub fn assert_well_formed(route: &RouteResult, start: GeoPoint, end: GeoPoint) {
    assert!(route.distance_km >= 0.0);
    assert!(route.duration_minutes >= 0.0);
    assert!(route.geometry.len() >= 2);
    assert_eq!(route.geometry.first(), Some(&start.to_lat_lng()));
    assert_eq!(route.geometry.last(), Some(&end.to_lat_lng()));
    assert!(route.geometry.iter().all(|p| p.lat.abs() <= 90.0));
}
