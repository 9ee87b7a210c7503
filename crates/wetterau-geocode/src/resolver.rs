//! Cache-first address resolution with retry and rate limiting.

use std::time::Duration;

use tokio::time::sleep;
use wetterau_core::models::Coordinate;
use wetterau_core::Result;

use crate::cache::GeocodeCache;
use crate::ports::{GeocodeError, Geocoder};

/// Resolves addresses through a [`Geocoder`], backed by a persistent cache.
///
/// Resolution is strictly sequential; the post-request delay is the
/// serialization point that enforces the external service's rate limit.
/// The resolver owns the cache for the duration of a run and is its sole
/// writer.
pub struct Resolver<G: Geocoder> {
    cache: GeocodeCache,
    geocoder: G,
    /// Pause after every external call
    delay: Duration,
    /// Total lookup attempts per address, timeouts included
    max_attempts: u32,
}

impl<G: Geocoder> Resolver<G> {
    pub fn new(cache: GeocodeCache, geocoder: G, delay: Duration, max_attempts: u32) -> Self {
        Self {
            cache,
            geocoder,
            delay,
            // At least one attempt, or resolve would never call out.
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Resolve an address to its best-known coordinate.
    ///
    /// Cache hits return immediately with no external call and no delay.
    /// A successful lookup is cached and flushed to disk before returning;
    /// a no-match answer returns `None` without caching, so a future run
    /// retries it instead of treating it as a permanent negative.
    ///
    /// Timeouts are retried after the delay up to `max_attempts` total
    /// tries; exhaustion logs a warning and yields `None` rather than
    /// stalling the whole run. Any other lookup failure propagates.
    pub async fn resolve(&mut self, address: &str) -> Result<Option<Coordinate>> {
        if let Some(coord) = self.cache.get(address) {
            return Ok(Some(coord));
        }

        let mut attempt = 1;
        loop {
            match self.geocoder.lookup(address).await {
                Ok(Some(coord)) => {
                    self.cache.insert(address, coord);
                    self.cache.flush()?;
                    sleep(self.delay).await;
                    return Ok(Some(coord));
                }
                Ok(None) => {
                    sleep(self.delay).await;
                    return Ok(None);
                }
                Err(GeocodeError::Timeout) => {
                    if attempt >= self.max_attempts {
                        tracing::warn!(
                            "Geocoding timed out {} times for '{}': giving up on this address",
                            attempt,
                            address
                        );
                        return Ok(None);
                    }
                    attempt += 1;
                    sleep(self.delay).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
