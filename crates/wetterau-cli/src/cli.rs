use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wetterau - municipal statistics toolkit for the Wetteraukreis
#[derive(Parser, Debug)]
#[command(name = "wetterau")]
#[command(about = "Extract, normalize, and re-export Wetteraukreis municipal statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file with geocoder settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Augment an address list with latitude/longitude
    Geocode(GeocodeArgs),

    /// Repair a messy CSV export (character map, column widths)
    Normalize(NormalizeArgs),

    /// Melt the map-display dataset from wide to long format
    Melt(MeltArgs),

    /// Export the Gemeinde mapping table
    Gemeinden(GemeindenArgs),
}

#[derive(Parser, Debug)]
pub struct GeocodeArgs {
    /// Input CSV with one address per row
    pub input: PathBuf,

    /// Output CSV with appended latitude/longitude columns
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Column holding the street and house number
    #[arg(long, default_value = "Anschrift")]
    pub street_column: String,

    /// Column holding the postal code
    #[arg(long, default_value = "PLZ")]
    pub plz_column: String,

    /// Column holding the city or town
    #[arg(long, default_value = "Ort")]
    pub ort_column: String,

    /// Field delimiter of the input file
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Location of the persistent geocode cache
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Base URL of the geocoding service
    #[arg(long)]
    pub geocoder_url: Option<String>,

    /// User-Agent sent with every lookup
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Pause after each external request, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Maximum lookup attempts per address on timeout
    #[arg(long)]
    pub max_retries: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// CSV file to repair
    pub input: PathBuf,

    /// Where to write the repaired file (defaults to in-place)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Field delimiter
    #[arg(long, default_value = ";")]
    pub delimiter: char,
}

#[derive(Parser, Debug)]
pub struct MeltArgs {
    /// Wide-format map-display CSV (one row per Kommune and year)
    pub input: PathBuf,

    /// Long-format output CSV
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct GemeindenArgs {
    /// Output CSV path
    #[arg(long, short = 'o', default_value = "gemeinden_mapping_tabelle.csv")]
    pub output: PathBuf,
}
