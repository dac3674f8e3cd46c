use super::credential::Credential;
use super::error::RoutingError;
use super::places::campus_place;
use super::point::GeoPoint;
use super::provider::RemoteOrsProvider;
use serde::Deserialize;

pub const DEFAULT_COUNTRY: &str = "IN";

#[derive(Debug, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<f64>,
}

impl RemoteOrsProvider {
    /// Resolves a pickup name: the campus list first, ORS geocoding on a miss.
    ///
    /// Known campus places need no credential.
    pub fn locate(
        &self,
        name: &str,
        country: &str,
        credential: Option<&Credential>,
    ) -> Result<Option<GeoPoint>, RoutingError> {
        if let Some(point) = campus_place(name) {
            log::debug!("[PROVIDER] \"{}\" found in campus places: {}", name.trim(), point);
            return Ok(Some(point));
        }
        let credential = credential.ok_or(RoutingError::MissingCredential)?;
        self.geocode_place(name.trim(), country, credential)
    }

    /// Looks up a free-text place name, restricted to one country.
    ///
    /// `Ok(None)` means the service answered but found nothing.
    pub fn geocode_place(
        &self,
        text: &str,
        country: &str,
        credential: &Credential,
    ) -> Result<Option<GeoPoint>, RoutingError> {
        log::debug!("[PROVIDER] Calling remote geocode for place: \"{}\"", text);
        let url = self.url("/geocode/search");
        let request = self.client().get(&url).query(&[
            ("text", text),
            ("size", "1"),
            ("boundary.country", country),
        ]);

        let text_body = self.execute(request, credential)?;
        let geo: GeoResponse = serde_json::from_str(&text_body).map_err(|e| {
            log::error!(
                "Failed to parse GeoResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text_body
            );
            e
        })?;

        let Some(feature) = geo.features.first() else {
            log::info!("No geocode results for \"{}\"", text);
            return Ok(None);
        };

        match feature.geometry.coordinates.as_slice() {
            [lon, lat, ..] => GeoPoint::new(*lon, *lat)
                .map(Some)
                .map_err(|e| RoutingError::Malformed(e.to_string())),
            other => Err(RoutingError::Malformed(format!(
                "geocode position needs two values, got {:?}",
                other
            ))),
        }
    }
}
