use super::catalog::Catalog;
use super::context::RunContext;
use super::decoder::{decode, AllocationReport};
use crate::domain::{
    AllocationMode, DedupPolicy, Result, SolverBackend, SolverError, SolverService,
};
use crate::solver::SolverFactory;

/// Knobs of a planning run
#[derive(Debug, Clone, Copy, Default)]
pub struct PlannerSettings {
    pub backend: SolverBackend,
    pub allocation_mode: AllocationMode,
    pub dedup_policy: DedupPolicy,
    pub materiality_threshold: f64,
}

/// Runs catalog → model → solve → decode. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct AllocationPlanner {
    settings: PlannerSettings,
}

impl AllocationPlanner {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Builds the model for `catalog` without solving it
    pub fn build(&self, catalog: &Catalog) -> Result<RunContext> {
        RunContext::build(
            catalog,
            self.settings.allocation_mode,
            self.settings.dedup_policy,
        )
    }

    /// Plans with a fresh solver of the configured backend
    pub fn plan(&self, catalog: &Catalog) -> Result<AllocationReport> {
        let solver = SolverFactory::create(self.settings.backend)?;
        self.plan_with(catalog, solver.as_ref())
    }

    /// Plans with the given solver. A single solve attempt is definitive.
    pub fn plan_with(
        &self,
        catalog: &Catalog,
        solver: &dyn SolverService,
    ) -> Result<AllocationReport> {
        let context = self.build(catalog)?;
        self.solve(&context, solver)
    }

    /// Solves an already built model and decodes the result
    pub fn solve(
        &self,
        context: &RunContext,
        solver: &dyn SolverService,
    ) -> Result<AllocationReport> {
        if context.problem.is_mixed_integer() && !solver.supports_mip() {
            return Err(SolverError::InvalidProblem(format!(
                "{} cannot solve models with binary variables",
                solver.name()
            ))
            .into());
        }

        tracing::info!(solver = solver.name(), "solving allocation model");
        let solution = solver.solve(&context.problem)?;
        tracing::info!(
            status = %solution.status,
            elapsed_ms = solution.statistics.solve_time_ms,
            "solver finished"
        );

        Ok(decode(
            context,
            &solution,
            self.settings.allocation_mode,
            self.settings.materiality_threshold,
        ))
    }
}
