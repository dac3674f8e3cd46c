pub mod geometric;
pub mod osrm;
pub mod remote;
pub mod types;

pub use geometric::HaversineProvider;
pub use osrm::OsrmProvider;
pub use remote::RemoteOrsProvider;

use super::error::RoutingError;
use reqwest::blocking::Client;
use std::time::Duration;

/// One pooled client per provider, bounded by the request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, RoutingError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
