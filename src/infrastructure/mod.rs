// Infrastructure: data loading, configuration and command line

pub mod cli;
pub mod config;
pub mod loader;

pub use cli::Cli;
pub use config::AppConfig;
pub use loader::CsvDataSource;
