//! Geocode command implementation
//!
//! Reads an address list, resolves every row through the cache-backed
//! resolver, and writes the list back out with latitude/longitude columns.

use crate::cli::GeocodeArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use wetterau_core::config::{CliConfigOverrides, LayeredConfig};
use wetterau_core::models::compose_address;
use wetterau_core::WetterauError;
use wetterau_geocode::{GeocodeCache, NominatimClient, Resolver};

#[derive(Debug, Serialize)]
struct GeocodeSummary {
    rows: usize,
    written: usize,
    skipped_incomplete: usize,
    resolved: usize,
    unmatched: usize,
    new_cache_entries: usize,
}

pub async fn execute(
    args: GeocodeArgs,
    config_file: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = config_file {
        config = config.load_from_file(path)?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        geocoder_url: args.geocoder_url,
        user_agent: args.user_agent,
        request_delay_ms: args.delay_ms,
        max_retries: args.max_retries,
        cache_path: args.cache,
    });

    let delimiter = args.delimiter as u8;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let headers = reader.headers()?.clone();
    let street_idx = column_index(&headers, &args.street_column, &args.input)?;
    let plz_idx = column_index(&headers, &args.plz_column, &args.input)?;
    let ort_idx = column_index(&headers, &args.ort_column, &args.input)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut out_headers = headers.clone();
    out_headers.push_field("latitude");
    out_headers.push_field("longitude");
    writer.write_record(&out_headers)?;

    let cache = GeocodeCache::load(&config.cache_path.value);
    let cached_before = cache.len();

    let client = NominatimClient::new(config.geocoder_url.value.clone(), &config.user_agent.value)?;
    let mut resolver = Resolver::new(
        cache,
        client,
        Duration::from_millis(config.request_delay_ms.value),
        config.max_retries.value,
    );

    let mut summary = GeocodeSummary {
        rows: 0,
        written: 0,
        skipped_incomplete: 0,
        resolved: 0,
        unmatched: 0,
        new_cache_entries: 0,
    };

    for record in reader.records() {
        let record = record?;
        summary.rows += 1;

        let street = record.get(street_idx).unwrap_or("").trim();
        let plz = record.get(plz_idx).unwrap_or("").trim();
        let ort = record.get(ort_idx).unwrap_or("").trim();

        // Rows with an incomplete address are dropped from the output,
        // matching the source list's cleaning step.
        if street.is_empty() || plz.is_empty() || ort.is_empty() {
            summary.skipped_incomplete += 1;
            continue;
        }

        let address = compose_address(street, plz, ort);
        let coord = resolver.resolve(&address).await?;

        let mut out = record.clone();
        match coord {
            Some(c) => {
                summary.resolved += 1;
                out.push_field(&c.latitude.to_string());
                out.push_field(&c.longitude.to_string());
            }
            None => {
                summary.unmatched += 1;
                out.push_field("");
                out.push_field("");
            }
        }
        writer.write_record(&out)?;
        summary.written += 1;
    }
    writer.flush()?;

    summary.new_cache_entries = resolver.cache().len().saturating_sub(cached_before);

    if output.is_json() {
        output.result(&summary)?;
    } else {
        output.success(format!("Result saved to {}", args.output.display()));
        output.section("Geocoding");
        output.kv("Rows", summary.rows);
        output.kv("Written", summary.written);
        output.kv("Skipped (incomplete address)", summary.skipped_incomplete);
        output.kv("Resolved", summary.resolved);
        output.kv("Unmatched", summary.unmatched);
        output.kv("New cache entries", summary.new_cache_entries);
        output.kv("Cache", config.cache_path.value.display());
    }

    Ok(())
}

fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            WetterauError::ColumnNotFound {
                column: name.to_string(),
                path: path.to_path_buf(),
            }
            .into()
        })
}
