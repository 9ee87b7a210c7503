//! Gemeinden command implementation
//!
//! Exports the canonical municipality registry as the `;`-separated mapping
//! table other pipelines and the dashboard join against.

use crate::cli::GemeindenArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use wetterau_core::gemeinden::REGISTRY;

pub fn execute(args: GemeindenArgs, output: &OutputWriter) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    writer.write_record(["gemeinde_id", "gemeinde", "gemeinde_schluessel"])?;
    for gemeinde in REGISTRY {
        writer.write_record([
            gemeinde.id.to_string().as_str(),
            gemeinde.name,
            gemeinde.schluessel,
        ])?;
    }
    writer.flush()?;

    output.success(format!("Result saved to {}", args.output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_all_registry_rows() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("gemeinden_mapping_tabelle.csv");

        let args = GemeindenArgs { output: output.clone() };
        execute(args, &OutputWriter::new(false)).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1 + REGISTRY.len());
        assert_eq!(lines[0], "gemeinde_id;gemeinde;gemeinde_schluessel");
        assert!(lines.contains(&"6440008;Friedberg (Hessen);06440008"));
        assert!(lines.contains(&"6440023;Rosbach v. d. Höhe;06440023"));
    }
}
