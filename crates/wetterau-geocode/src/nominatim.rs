//! Nominatim search client.

use serde::Deserialize;
use std::time::Duration;

use async_trait::async_trait;
use wetterau_core::models::Coordinate;
use wetterau_core::{Result, WetterauError};

use crate::ports::{GeocodeError, Geocoder};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Nominatim free-text search API.
pub struct NominatimClient {
    /// Base URL of the service (e.g. "https://nominatim.openstreetmap.org")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NominatimClient {
    /// Create a new client.
    ///
    /// Nominatim's usage policy requires an identifying User-Agent, so one
    /// is mandatory here.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WetterauError::GeocoderUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { base_url: base_url.into(), client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn lookup(&self, address: &str) -> std::result::Result<Option<Coordinate>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeError::Timeout
                } else {
                    GeocodeError::Unavailable {
                        reason: format!("Failed to reach geocoding service: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Rejected { status, body });
        }

        let places: Vec<SearchResult> =
            response.json().await.map_err(|e| GeocodeError::Unavailable {
                reason: format!("Failed to parse geocoding response: {}", e),
            })?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        // Nominatim serializes coordinates as strings
        let latitude = place.lat.parse::<f64>().map_err(|_| GeocodeError::Unavailable {
            reason: format!("Non-numeric latitude in response: '{}'", place.lat),
        })?;
        let longitude = place.lon.parse::<f64>().map_err(|_| GeocodeError::Unavailable {
            reason: format!("Non-numeric longitude in response: '{}'", place.lon),
        })?;

        Ok(Some(Coordinate::new(latitude, longitude)))
    }
}

/// One entry of the Nominatim search response
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NominatimClient::new("http://localhost:8080", "wetterau-mapper").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_search_result_parses_string_coordinates() {
        let json = r#"[{"lat": "50.3371", "lon": "8.7527", "display_name": "Friedberg"}]"#;
        let places: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        assert_eq!(places[0].lat, "50.3371");
        assert_eq!(places[0].lon, "8.7527");
    }
}
