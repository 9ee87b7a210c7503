//! Canonical value types shared across the wetterau crates.

use serde::{Deserialize, Serialize};

/// A WGS 84 coordinate pair as returned by the geocoding service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.latitude, coord.longitude]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Compose the free-text lookup address from its structured parts.
///
/// Follows the `"Straße, PLZ Ort"` shape the geocoding service expects.
/// All parts are trimmed; the caller is responsible for dropping rows with
/// empty components beforehand.
pub fn compose_address(street: &str, plz: &str, ort: &str) -> String {
    format!("{}, {} {}", street.trim(), plz.trim(), ort.trim())
}
