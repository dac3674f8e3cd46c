use super::credential::Credential;
use super::error::RoutingError;
use super::point::GeoPoint;
use super::route::{RouteResult, RouteSource};

pub trait RoutingProvider: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Tier tag stamped onto every result this provider produces.
    fn source(&self) -> RouteSource;

    /// Providers that need a credential are skipped, not attempted, when the
    /// caller has none.
    fn requires_credential(&self) -> bool {
        false
    }

    /// Gets directions between two points.
    fn attempt(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        credential: Option<&Credential>,
    ) -> Result<RouteResult, RoutingError>;
}
