use super::error::ResolveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated longitude/latitude pair.
///
/// Callers hand points over in the upstream (lon, lat) convention. Points
/// are built through [`GeoPoint::new`], so every `GeoPoint` is finite and in
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Result<Self, ResolveError> {
        // Range checks also reject NaN and infinities.
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ResolveError::InvalidCoordinate {
                lon,
                lat,
                reason: "longitude must be a finite value in [-180, 180]",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ResolveError::InvalidCoordinate {
                lon,
                lat,
                reason: "latitude must be a finite value in [-90, 90]",
            });
        }
        Ok(Self { lon, lat })
    }

    /// Compile-time constants only; skips range checks.
    pub(crate) const fn new_unchecked(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// The same point in output (lat, lon) order.
    pub fn to_lat_lng(self) -> LatLng {
        LatLng {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Upstream request order.
    pub(crate) fn lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = ResolveError;

    fn try_from([lon, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        GeoPoint::new(lon, lat)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        point.lon_lat()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// One vertex of a returned path, always serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lon].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LatLng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lat, lon] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(LatLng { lat, lon })
    }
}
