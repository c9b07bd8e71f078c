// Domain layer: entities, the solver-neutral model and the solver contract
pub mod domain;

// Application layer: catalog, gain matrix, model building and decoding
pub mod application;

// Infrastructure layer: CSV loading, configuration, command line
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    AllocationMode, DataSource, DedupPolicy, Investment, InvestmentLimits, Need, PlannerError,
    RawData, RawInvestment, RawLimits, RawNeed, Solution, SolutionStatus, SolverBackend,
    SolverError, SolverService,
};

pub use application::{
    AllocationEntry, AllocationPlanner, AllocationReport, Catalog, GainMatrix, PlannerSettings,
    RunContext,
};

pub use infrastructure::{AppConfig, Cli, CsvDataSource};

pub use solver::{MicroLpSolver, SolverFactory};

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;

#[cfg(feature = "highs")]
pub use solver::HighsSolver;
