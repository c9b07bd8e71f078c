use super::solver_service::SolverError;

/// Errors that abort an allocation run
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
