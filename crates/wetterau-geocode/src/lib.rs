//! Wetterau Geocode - cache-backed address geocoding
//!
//! Resolves free-text postal addresses to coordinates through an external
//! geocoding service, with a persistent on-disk cache, a fixed inter-request
//! delay, and bounded retry on timeout.

pub mod cache;
pub mod nominatim;
pub mod ports;
pub mod resolver;

pub use cache::GeocodeCache;
pub use nominatim::NominatimClient;
pub use ports::{GeocodeError, Geocoder};
pub use resolver::Resolver;
