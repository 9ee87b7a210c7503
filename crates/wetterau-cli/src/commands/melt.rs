//! Melt command implementation
//!
//! Turns the wide map-display table (one row per Kommune and year, one
//! column per indicator) into the long format the dashboard ingests: one
//! row per (gemeinde, jahr, variable). Gemeinde names are normalized to
//! their canonical registry form on the way through.

use crate::cli::MeltArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use wetterau_core::normalize::{match_gemeinde, NameMatch};
use wetterau_core::WetterauError;

/// The eight fixed indicator columns of the map-display dataset.
const INDICATORS: &[&str] = &[
    "Anzahl Bevölkerung je Kommune",
    "Fläche der Kommune",
    "Bevölkerungsdichte",
    "Unter 21 Jährige",
    "21 bis 65 Jährige",
    "Über 65 Jährige",
    "Jugendquotient",
    "Altenquotient",
];

const OUT_HEADER: &[&str] =
    &["gemeinde", "gemeinde_schluessel", "iso", "jahr", "contour", "variable", "value"];

#[derive(Debug, Serialize)]
struct MeltSummary {
    input_rows: usize,
    output_rows: usize,
    unmatched_names: usize,
}

pub fn execute(args: MeltArgs, output: &OutputWriter) -> Result<()> {
    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let headers = reader.headers()?.clone();

    // The source alternates between the raw and already-renamed headers
    let gemeinde_idx = column_index(&headers, &["Kommune", "gemeinde"], &args.input)?;
    let schluessel_idx =
        column_index(&headers, &["Schlüssel", "gemeinde_schluessel"], &args.input)?;
    let jahr_idx = column_index(&headers, &["jahr"], &args.input)?;
    let contour_idx = column_index(&headers, &["contour"], &args.input)?;

    let mut indicator_cols: Vec<(&str, usize)> = Vec::new();
    for name in INDICATORS {
        match headers.iter().position(|h| h.trim() == *name) {
            Some(idx) => indicator_cols.push((*name, idx)),
            None => tracing::warn!("Indicator column '{}' not found in {}", name, args.input.display()),
        }
    }

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writer.write_record(OUT_HEADER)?;

    let mut summary = MeltSummary { input_rows: 0, output_rows: 0, unmatched_names: 0 };

    for record in reader.records() {
        let record = record?;
        summary.input_rows += 1;

        let raw_name = record.get(gemeinde_idx).unwrap_or("").trim();
        let matched = match_gemeinde(raw_name);
        if !matched.is_matched() {
            summary.unmatched_names += 1;
        }

        let mut schluessel = record.get(schluessel_idx).unwrap_or("").trim().to_string();
        if schluessel.is_empty() {
            if let NameMatch::Canonical(g) = &matched {
                schluessel = g.schluessel.to_string();
            }
        }

        let jahr = record.get(jahr_idx).unwrap_or("").trim();
        let contour = record.get(contour_idx).unwrap_or("").trim();

        for &(variable, idx) in &indicator_cols {
            let value = record.get(idx).unwrap_or("").trim();
            writer.write_record([
                matched.name(),
                schluessel.as_str(),
                "",
                jahr,
                contour,
                variable,
                value,
            ])?;
            summary.output_rows += 1;
        }
    }
    writer.flush()?;

    if output.is_json() {
        output.result(&summary)?;
    } else {
        output.success(format!(
            "Saved: {}, rows: {}",
            args.output.display(),
            summary.output_rows
        ));
        if summary.unmatched_names > 0 {
            output.warning(format!(
                "{} row(s) with a Gemeinde name not in the registry",
                summary.unmatched_names
            ));
        }
    }

    Ok(())
}

fn column_index(headers: &csv::StringRecord, names: &[&str], path: &Path) -> Result<usize> {
    for name in names {
        if let Some(idx) = headers.iter().position(|h| h.trim() == *name) {
            return Ok(idx);
        }
    }
    Err(WetterauError::ColumnNotFound {
        column: names.join("/"),
        path: path.to_path_buf(),
    }
    .into())
}
