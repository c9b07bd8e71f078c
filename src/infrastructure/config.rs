//! Application configuration management.
//!
//! Values are layered with a fixed precedence: built-in defaults, then an
//! optional TOML file, then `FUNDPLAN_*` environment variables, then CLI flags.

use super::cli::Cli;
use crate::application::PlannerSettings;
use crate::domain::{AllocationMode, DedupPolicy, SolverBackend};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Where the input tables live
    #[serde(default)]
    pub data: DataConfig,

    /// Backend and model shape
    #[serde(default)]
    pub solver: SolverConfig,

    /// Entity identity rules
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output filtering
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory with `Investments.csv`, `Needs.csv` and `Limits.csv`
    pub dir: PathBuf,

    /// Day that due dates are resolved against; today when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            as_of: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SolverConfig {
    #[serde(default)]
    pub backend: SolverBackend,
    #[serde(default)]
    pub allocation_mode: AllocationMode,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub dedup_policy: DedupPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    /// Allocations at or below this absolute amount are left out of the entry list
    #[serde(default)]
    pub materiality_threshold: f64,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI flags (highest priority)
    /// 2. Environment variables
    /// 3. Config file given by the CLI
    /// 4. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `FUNDPLAN_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export FUNDPLAN_DATA__DIR="/srv/plans/2024"
    /// export FUNDPLAN_SOLVER__BACKEND="highs"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("FUNDPLAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = config.build()?.try_deserialize()?;
        loaded.apply_cli(cli);
        Ok(loaded)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.data_dir {
            self.data.dir = dir.clone();
        }
        if let Some(backend) = cli.backend {
            self.solver.backend = backend;
        }
        if let Some(as_of) = cli.as_of {
            self.data.as_of = Some(as_of);
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.data
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            backend: self.solver.backend,
            allocation_mode: self.solver.allocation_mode,
            dedup_policy: self.catalog.dedup_policy,
            materiality_threshold: self.report.materiality_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let cli = Cli::parse_from(["fundplan"]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.solver.allocation_mode, AllocationMode::Fractional);
        assert_eq!(config.catalog.dedup_policy, DedupPolicy::FullName);
        assert_eq!(config.report.materiality_threshold, 0.0);
    }

    #[test]
    fn file_then_cli_layering() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[data]\ndir = \"plans\"\nas_of = \"2024-01-01\"\n\n[solver]\nbackend = \"microlp\"\nallocation_mode = \"whole\"\n\n[catalog]\ndedup_policy = \"first_character\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from(["fundplan", "--config", &path, "--data-dir", "override"]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.data.dir, PathBuf::from("override"));
        assert_eq!(config.data.as_of, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.solver.backend, SolverBackend::MicroLp);
        assert_eq!(config.solver.allocation_mode, AllocationMode::Whole);
        assert_eq!(config.catalog.dedup_policy, DedupPolicy::FirstCharacter);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["fundplan", "--config", "/nonexistent/fundplan.toml"]);
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn backend_names_match_between_file_and_cli() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[solver]\nbackend = \"coin_cbc\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let from_file = AppConfig::load(&Cli::parse_from(["fundplan", "--config", &path])).unwrap();
        assert_eq!(from_file.solver.backend, SolverBackend::CoinCbc);

        for (name, backend) in [
            ("auto", SolverBackend::Auto),
            ("microlp", SolverBackend::MicroLp),
            ("coin_cbc", SolverBackend::CoinCbc),
            ("highs", SolverBackend::Highs),
        ] {
            let cli = Cli::parse_from(["fundplan", "--backend", name]);
            assert_eq!(cli.backend, Some(backend), "--backend {name}");
        }
    }
}
