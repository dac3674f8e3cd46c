use crate::sdk::routing::credential::Credential;
use crate::sdk::routing::error::ResolveError;
use crate::sdk::routing::point::GeoPoint;
use crate::sdk::routing::provider::geometric::{DEFAULT_SPEED_KMH, EARTH_RADIUS_KM};
use crate::sdk::routing::provider::osrm::OSRM_BASE_URL;
use crate::sdk::routing::provider::remote::ORS_BASE_URL;
use crate::sdk::util::rate_limit::ORS_REQUESTS_PER_MINUTE;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const HOSPITAL_LAT: f64 = 19.1309507;
pub const HOSPITAL_LNG: f64 = 72.9146062;
pub const HOSPITAL: GeoPoint = GeoPoint::new_unchecked(HOSPITAL_LNG, HOSPITAL_LAT);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} could not be parsed from {value:?}")]
    Unparseable { name: &'static str, value: String },

    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Invalid hospital location: {0}")]
    Hospital(#[from] ResolveError),
}

/// Everything needed to build the default resolver chain.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub ors_api_key: Option<Credential>,
    pub ors_base_url: String,
    pub osrm_base_url: String,
    pub timeout: Duration,
    pub speed_kmh: f64,
    pub earth_radius_km: f64,
    pub ors_requests_per_minute: NonZeroU32,
    pub hospital: GeoPoint,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ors_api_key: None,
            ors_base_url: ORS_BASE_URL.to_string(),
            osrm_base_url: OSRM_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            speed_kmh: DEFAULT_SPEED_KMH,
            earth_radius_km: EARTH_RADIUS_KM,
            ors_requests_per_minute: ORS_REQUESTS_PER_MINUTE,
            hospital: HOSPITAL,
        }
    }
}

impl ResolverConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let hospital = GeoPoint::new(
            parse_or(&lookup, "HOSPITAL_LNG", defaults.hospital.lon())?,
            parse_or(&lookup, "HOSPITAL_LAT", defaults.hospital.lat())?,
        )?;

        let config = Self {
            ors_api_key: lookup("ORS_API_KEY").and_then(Credential::new),
            ors_base_url: lookup("ORS_BASE_URL").unwrap_or(defaults.ors_base_url),
            osrm_base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.osrm_base_url),
            timeout: timeout_secs(
                "ROUTE_TIMEOUT_SECS",
                parse_or(&lookup, "ROUTE_TIMEOUT_SECS", defaults.timeout.as_secs())?,
            )?,
            speed_kmh: positive(
                "FALLBACK_SPEED_KMH",
                parse_or(&lookup, "FALLBACK_SPEED_KMH", defaults.speed_kmh)?,
            )?,
            earth_radius_km: positive(
                "EARTH_RADIUS_KM",
                parse_or(&lookup, "EARTH_RADIUS_KM", defaults.earth_radius_km)?,
            )?,
            ors_requests_per_minute: parse_or(
                &lookup,
                "ORS_REQUESTS_PER_MINUTE",
                defaults.ors_requests_per_minute,
            )?,
            hospital,
        };

        if config.ors_api_key.is_none() {
            log::info!("ORS_API_KEY not set, routing will start at the public OSRM tier");
        }
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Unparseable { name, value }),
        None => Ok(default),
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Whole seconds, zero rejected.
pub fn timeout_secs(name: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    match secs {
        0 => Err(ConfigError::NotPositive { name, value: 0.0 }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
