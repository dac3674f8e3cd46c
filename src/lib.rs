pub mod sdk;

pub use sdk::config::ResolverConfig;
pub use sdk::routing::credential::Credential;
pub use sdk::routing::error::{ResolveError, RoutingError};
pub use sdk::routing::point::{GeoPoint, LatLng};
pub use sdk::routing::resolver::RouteResolver;
pub use sdk::routing::route::{RouteResult, RouteSource};
