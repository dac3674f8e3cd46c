use super::credential::Credential;
use super::error::RoutingError;
use super::point::GeoPoint;
use super::provider::RemoteOrsProvider;
use serde_json::{json, Value};

pub const DEFAULT_RANGES_MINUTES: [u32; 4] = [3, 5, 7, 10];

impl RemoteOrsProvider {
    /// Driving-time reachability polygons around `center`, one per range.
    ///
    /// Returns the upstream GeoJSON `FeatureCollection` untouched; its
    /// polygons stay in GeoJSON (lon, lat) order.
    pub fn fetch_isochrones(
        &self,
        center: GeoPoint,
        ranges_minutes: &[u32],
        credential: &Credential,
    ) -> Result<Value, RoutingError> {
        if ranges_minutes.is_empty() {
            return Err(RoutingError::InvalidRequest(
                "at least one isochrone range is required".to_string(),
            ));
        }
        if ranges_minutes.contains(&0) {
            return Err(RoutingError::InvalidRequest(
                "isochrone ranges must be positive".to_string(),
            ));
        }

        let seconds = ranges_minutes
            .iter()
            .map(|m| m.checked_mul(60))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(|| {
                RoutingError::InvalidRequest(format!(
                    "isochrone ranges must be at most {} minutes",
                    u32::MAX / 60
                ))
            })?;

        let url = self.url("/v2/isochrones/driving-car");
        let body = json!({
            "locations": [center.lon_lat()],
            "range": seconds,
            "range_type": "time",
        });
        log::debug!(
            "[PROVIDER] Calling remote isochrones around {} for {:?} min",
            center,
            ranges_minutes
        );

        let text = self.execute(self.client().post(&url).json(&body), credential)?;
        let collection: Value = serde_json::from_str(&text)?;

        if !collection["features"].is_array() {
            log::error!("Isochrone response without features. Body: {}", text);
            return Err(RoutingError::Malformed(
                "isochrone response has no features array".to_string(),
            ));
        }
        Ok(collection)
    }
}
