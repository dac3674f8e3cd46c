//! Failure injection against mock upstreams for the full provider chain.

use campus_route::sdk::routing::HaversineProvider;
use campus_route::{LatLng, RouteResolver, RouteSource};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

const ORS_PATH: &str = "/v2/directions/driving-car/geojson";
const OSRM_PATH: &str = "/route/v1/driving/72.9133,19.1334;72.9146062,19.1309507";

async fn servers() -> (MockServer, MockServer) {
    (MockServer::start().await, MockServer::start().await)
}

#[tokio::test]
async fn healthy_primary_short_circuits_the_chain() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .and(path(ORS_PATH))
        .and(header("Authorization", API_KEY))
        .and(body_partial_json(json!({
            "coordinates": [[72.9133, 19.1334], [72.9146062, 19.1309507]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ors_body(820.0, 150.0, campus_path())))
        .expect(1)
        .mount(&ors)
        .await;
    Mock::given(path_regex("^/route/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    let (start, end) = campus_trip();
    assert_eq!(route.source, RouteSource::Primary);
    assert_close(route.distance_km, 0.82);
    assert_close(route.duration_minutes, 2.5);
    assert_eq!(route.geometry.len(), 3);
    assert_eq!(route.geometry[1], LatLng { lat: 19.1320, lon: 72.9140 });
    assert_well_formed(&route, start, end);
}

#[tokio::test]
async fn primary_500_uses_secondary_values() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .and(path(ORS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 2099, "message": "Unknown internal error" }
        })))
        .expect(1)
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .and(path(OSRM_PATH))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(905.3, 121.2, campus_path())))
        .expect(1)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    let (start, end) = campus_trip();
    assert_eq!(route.source, RouteSource::Secondary);
    assert_close(route.distance_km, 905.3 / 1000.0);
    assert_close(route.duration_minutes, 121.2 / 60.0);
    assert_well_formed(&route, start, end);
}

#[tokio::test]
async fn missing_credential_never_reaches_primary() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ors_body(1.0, 1.0, campus_path())))
        .expect(0)
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .and(path(OSRM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(700.0, 90.0, campus_path())))
        .expect(1)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, None).await;

    assert_eq!(route.source, RouteSource::Secondary);
    assert_close(route.distance_km, 0.7);
}

#[tokio::test]
async fn blank_credential_counts_as_missing() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(700.0, 90.0, campus_path())))
        .expect(1)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some("   ")).await;

    assert_eq!(route.source, RouteSource::Secondary);
}

#[tokio::test]
async fn both_network_tiers_failing_gives_exact_haversine() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "Impossible route between points",
            "routes": []
        })))
        .expect(1)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    let (start, end) = campus_trip();
    assert_eq!(route.source, RouteSource::Geometric);
    assert_eq!(route, HaversineProvider::default().estimate(start, end));
    assert!((route.distance_km - 0.30).abs() <= 0.01);
    assert!((route.duration_minutes - 0.6).abs() <= 0.02);
}

#[tokio::test]
async fn malformed_primary_body_falls_through() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(650.0, 80.0, campus_path())))
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    assert_eq!(route.source, RouteSource::Secondary);
}

#[tokio::test]
async fn empty_primary_features_fall_through() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "type": "FeatureCollection", "features": [] })),
        )
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(650.0, 80.0, campus_path())))
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    assert_eq!(route.source, RouteSource::Secondary);
}

#[tokio::test]
async fn slow_primary_times_out_into_secondary() {
    let (ors, osrm) = servers().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ors_body(820.0, 150.0, campus_path()))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&ors)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(osrm_body(650.0, 80.0, campus_path())))
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_millis(500));
    let route = resolve_blocking(config, Some(API_KEY)).await;

    assert_eq!(route.source, RouteSource::Secondary);
    assert_close(route.distance_km, 0.65);
}

#[tokio::test]
async fn osrm_invalid_query_status_falls_to_geometric() {
    let (ors, osrm) = servers().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "InvalidQuery",
            "message": "Query string malformed close to position 28"
        })))
        .expect(1)
        .mount(&osrm)
        .await;

    let config = config_for(&ors.uri(), &osrm.uri(), Duration::from_secs(5));
    let route = resolve_blocking(config, None).await;

    assert_eq!(route.source, RouteSource::Geometric);
}

#[test]
fn unreachable_upstreams_still_resolve() {
    // Nothing listens on the discard port.
    let config = config_for(
        "http://127.0.0.1:9",
        "http://127.0.0.1:9",
        Duration::from_secs(2),
    );
    let resolver = RouteResolver::from_config(&config).unwrap();
    let (start, end) = campus_trip();
    let credential = campus_route::Credential::new(API_KEY);

    let route = resolver.resolve(start, end, credential.as_ref());

    assert_eq!(route.source, RouteSource::Geometric);
    assert_well_formed(&route, start, end);
}
