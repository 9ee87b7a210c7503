//! Normalize command implementation
//!
//! Repairs a messy CSV export: applies the character map to every cell,
//! trims trailing empty cells, and forces every row to the header's column
//! count. The report lists how many rows were truncated or padded and which
//! non-ASCII characters survived the map.

use crate::cli::NormalizeArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use wetterau_core::textnorm::{normalize_cell, ResidueCounter};

#[derive(Debug, Serialize)]
struct NormalizeSummary {
    rows: usize,
    truncated: usize,
    padded: usize,
    residue: BTreeMap<String, usize>,
}

pub fn execute(args: NormalizeArgs, output: &OutputWriter) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| args.input.clone());
    let delimiter = args.delimiter as u8;

    let mut residue = ResidueCounter::new();
    let mut summary = NormalizeSummary {
        rows: 0,
        truncated: 0,
        padded: 0,
        residue: BTreeMap::new(),
    };

    // Read and repair everything up front; the output may overwrite the
    // input file.
    let (header, rows) = {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_path(&args.input)
            .with_context(|| format!("Failed to open {}", args.input.display()))?;

        let mut records = reader.records();

        let header: Vec<String> = match records.next() {
            Some(record) => record?
                .iter()
                .map(|cell| normalize_cell(cell, &mut residue))
                .collect(),
            None => Vec::new(),
        };
        let expected = header.len().max(1);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in records {
            let record = record?;
            summary.rows += 1;

            let mut row: Vec<String> = record
                .iter()
                .map(|cell| normalize_cell(cell, &mut residue))
                .collect();

            // Trailing ';;;' runs show up as empty cells at the row end
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }

            if row.len() > expected {
                row.truncate(expected);
                summary.truncated += 1;
            } else if row.len() < expected {
                row.resize(expected, String::new());
                summary.padded += 1;
            }
            rows.push(row);
        }

        (header, rows)
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(&out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    if !header.is_empty() {
        writer.write_record(&header)?;
    }
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    summary.residue = residue.iter().map(|(c, n)| (c.to_string(), *n)).collect();

    if output.is_json() {
        output.result(&summary)?;
    } else {
        output.success(format!(
            "{} -> {} | rows={}, truncated={}, padded={}",
            args.input.display(),
            out_path.display(),
            summary.rows,
            summary.truncated,
            summary.padded
        ));
        if !residue.is_empty() {
            output.warning("Non-ASCII characters not covered by the map:");
            for (c, count) in residue.iter().take(20) {
                output.warning(format!("    {:?} (U+{:04X}) x {}", c, *c as u32, count));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::NormalizeArgs;
    use std::fs;
    use tempfile::TempDir;

    fn run(input_content: &str) -> (String, TempDir) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, input_content).unwrap();

        let args = NormalizeArgs {
            input: input.clone(),
            output: Some(output.clone()),
            delimiter: ';',
        };
        execute(args, &OutputWriter::new(false)).unwrap();

        (fs::read_to_string(&output).unwrap(), dir)
    }

    #[test]
    fn test_char_map_applied_to_cells() {
        let (out, _dir) = run("Gemeinde;Betrag\nBüdingen;1.200 €\n");
        assert_eq!(out, "Gemeinde;Betrag\nBuedingen;1.200 EUR\n");
    }

    #[test]
    fn test_ragged_rows_are_repaired() {
        let (out, _dir) = run("a;b;c\n1;2;3;4;5\n1\n1;2;3;;;\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "1;2;3"); // truncated
        assert_eq!(lines[2], "1;;"); // padded
        assert_eq!(lines[3], "1;2;3"); // trailing empties dropped, row already header width
    }

    #[test]
    fn test_in_place_when_no_output_given() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(&input, "Ort\nMünzenberg\n").unwrap();

        let args = NormalizeArgs { input: input.clone(), output: None, delimiter: ';' };
        execute(args, &OutputWriter::new(false)).unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), "Ort\nMuenzenberg\n");
    }
}
