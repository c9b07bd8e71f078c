use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
use crate::solver::MicroLpSolver;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a fresh solver for one run.
    ///
    /// `Auto` picks HiGHS, then CBC, then microlp, depending on which
    /// backends were compiled in.
    pub fn create(backend: SolverBackend) -> Result<Box<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Ok(Self::default_solver()),
            SolverBackend::MicroLp => Ok(Box::new(MicroLpSolver::new())),
            SolverBackend::CoinCbc => Self::coin_cbc(),
            SolverBackend::Highs => Self::highs(),
        }
    }

    /// Get the strongest compiled-in solver
    pub fn default_solver() -> Box<dyn SolverService> {
        Self::highs()
            .or_else(|_| Self::coin_cbc())
            .unwrap_or_else(|_| Box::new(MicroLpSolver::new()))
    }

    #[cfg(feature = "coin_cbc")]
    fn coin_cbc() -> Result<Box<dyn SolverService>> {
        Ok(Box::new(crate::solver::CoinCbcSolver::new()))
    }

    #[cfg(not(feature = "coin_cbc"))]
    fn coin_cbc() -> Result<Box<dyn SolverService>> {
        Err(SolverError::SolverNotAvailable(
            "COIN-OR CBC support was not compiled in (enable the `coin_cbc` feature)".to_string(),
        ))
    }

    #[cfg(feature = "highs")]
    fn highs() -> Result<Box<dyn SolverService>> {
        Ok(Box::new(crate::solver::HighsSolver::new()))
    }

    #[cfg(not(feature = "highs"))]
    fn highs() -> Result<Box<dyn SolverService>> {
        Err(SolverError::SolverNotAvailable(
            "HiGHS support was not compiled in (enable the `highs` feature)".to_string(),
        ))
    }
}
