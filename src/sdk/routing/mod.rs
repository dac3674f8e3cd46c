pub mod credential;
pub mod error;
pub mod geocode;
pub mod isochrone;
pub mod places;
pub mod point;
pub mod provider;
pub mod resolver;
pub mod route;
pub mod service;

pub use credential::Credential;
pub use error::{ResolveError, RoutingError};
pub use places::campus_place;
pub use point::{GeoPoint, LatLng};
pub use provider::{HaversineProvider, OsrmProvider, RemoteOrsProvider};
pub use resolver::{BuildError, RouteResolver};
pub use route::{RouteResult, RouteSource};
pub use service::RoutingProvider;
