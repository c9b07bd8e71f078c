//! Command-line interface definition and parsing.

use crate::domain::SolverBackend;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Allocate cash needs across term investments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "FUNDPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding Investments.csv, Needs.csv and Limits.csv.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// LP backend to solve with.
    #[arg(short, long, value_enum)]
    pub backend: Option<SolverBackend>,

    /// Resolve due dates against this day instead of today (YYYY-MM-DD).
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Write the model in LP format to this file before solving.
    #[arg(long)]
    pub export_lp: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
