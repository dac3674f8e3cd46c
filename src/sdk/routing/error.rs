use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

// Helper structs to parse the JSON error response from ORS
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

/// Why a single provider attempt did not produce a route.
///
/// The resolver absorbs every variant and moves on to the next tier; callers
/// of the individual providers see them directly.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("No credential supplied for a keyed provider")]
    MissingCredential,

    #[error("Local rate limit exhausted, next slot in {retry_after:?}")]
    RateLimited { retry_after: Duration },

    // This variant hold the structured error from the API
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u32, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error (HTTP {status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("Router rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("No route found in success response")]
    NoRoute,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl RoutingError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RoutingError::RequestError(e) if e.is_timeout())
    }
}

/// The only error a caller of the resolver can observe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Invalid coordinate (lon {lon}, lat {lat}): {reason}")]
    InvalidCoordinate {
        lon: f64,
        lat: f64,
        reason: &'static str,
    },
}
