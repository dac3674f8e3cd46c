use super::error::RoutingError;
use super::point::{GeoPoint, LatLng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tier produced a [`RouteResult`]. Ordered from most to least accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Primary,
    Secondary,
    Geometric,
}

impl RouteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteSource::Primary => "primary",
            RouteSource::Secondary => "secondary",
            RouteSource::Geometric => "geometric",
        }
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized route between two points: kilometres, minutes and a
/// (lat, lon) path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub geometry: Vec<LatLng>,
    pub source: RouteSource,
}

impl RouteResult {
    /// Makes the path start exactly at `start` and end exactly at `end`.
    ///
    /// Road routers snap endpoints onto the network, so the requested points
    /// are added as connectors rather than replacing the snapped vertices.
    pub(crate) fn pin_endpoints(mut self, start: GeoPoint, end: GeoPoint) -> Self {
        let first = start.to_lat_lng();
        let last = end.to_lat_lng();

        if self.geometry.first() != Some(&first) {
            self.geometry.insert(0, first);
        }
        if self.geometry.len() < 2 || self.geometry.last() != Some(&last) {
            self.geometry.push(last);
        }
        self
    }

    /// Rejects numbers and positions no real route can have.
    pub(crate) fn checked(self) -> Result<Self, RoutingError> {
        if !(self.distance_km.is_finite() && self.distance_km >= 0.0) {
            return Err(RoutingError::Malformed(format!(
                "distance must be a non-negative number, got {}",
                self.distance_km
            )));
        }
        if !(self.duration_minutes.is_finite() && self.duration_minutes >= 0.0) {
            return Err(RoutingError::Malformed(format!(
                "duration must be a non-negative number, got {}",
                self.duration_minutes
            )));
        }
        if let Some(bad) = self
            .geometry
            .iter()
            .find(|p| GeoPoint::new(p.lon, p.lat).is_err())
        {
            return Err(RoutingError::Malformed(format!(
                "geometry point out of range: [{}, {}]",
                bad.lat, bad.lon
            )));
        }
        Ok(self)
    }

    /// Appends the next leg of a multi-stop trip. The joined route carries
    /// the least accurate tier of the two legs.
    pub(crate) fn join(mut self, next: RouteResult) -> Self {
        self.distance_km += next.distance_km;
        self.duration_minutes += next.duration_minutes;
        self.source = self.source.max(next.source);

        let mut rest = next.geometry.into_iter().peekable();
        if rest.peek() == self.geometry.last() {
            rest.next();
        }
        self.geometry.extend(rest);
        self
    }
}
