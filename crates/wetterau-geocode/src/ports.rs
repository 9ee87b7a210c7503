//! Outbound port for the external geocoding service.

use async_trait::async_trait;
use thiserror::Error;
use wetterau_core::models::Coordinate;
use wetterau_core::WetterauError;

/// Failure modes of a single external lookup.
///
/// Only `Timeout` is recoverable; the resolver retries it locally. Every
/// other variant is terminal for the run and surfaces to the caller.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Geocoding service unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Geocoding service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<GeocodeError> for WetterauError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Timeout => WetterauError::GeocoderUnavailable {
                reason: "request timed out".to_string(),
            },
            GeocodeError::Unavailable { reason } => WetterauError::GeocoderUnavailable { reason },
            GeocodeError::Rejected { status, body } => {
                WetterauError::GeocoderRejected { status, body }
            }
        }
    }
}

/// Resolver for free-text addresses to geographic coordinates.
///
/// This is an outbound port abstracting the external lookup service.
/// `Ok(None)` means the service answered but found no match; that is data,
/// not an error.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}
