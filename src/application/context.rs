use super::catalog::Catalog;
use super::gain_matrix::GainMatrix;
use super::model_builder::{
    add_capacity_constraints, add_coverage_constraints, build_variables, VariableGrid,
};
use super::objective::build_objective;
use crate::domain::{
    AllocationMode, ConstraintId, DedupPolicy, Investment, Need, OptimizationProblem, Result,
};

/// Everything one run builds, owned by that run and dropped after decoding
#[derive(Debug, Clone)]
pub struct RunContext {
    pub investments: Vec<Investment>,
    pub needs: Vec<Need>,
    pub gains: GainMatrix,
    pub grid: VariableGrid,
    pub problem: OptimizationProblem,
    pub capacity_rows: Vec<ConstraintId>,
    pub coverage_rows: Vec<ConstraintId>,
}

impl RunContext {
    /// Builds the full model from the active entities of `catalog`
    pub fn build(catalog: &Catalog, mode: AllocationMode, policy: DedupPolicy) -> Result<Self> {
        let investments = catalog.active_investments();
        let needs = catalog.active_needs();

        let gains = GainMatrix::build(&investments, &needs);
        tracing::debug!(rows = gains.rows(), cols = gains.cols(), "gain matrix\n{}", gains);

        let mut problem = OptimizationProblem::new("investment_allocation");
        let grid = build_variables(&mut problem, gains.rows(), gains.cols(), mode);
        let capacity_rows =
            add_capacity_constraints(&mut problem, &investments, &gains, &grid, policy)?;
        let coverage_rows = add_coverage_constraints(&mut problem, &needs, &gains, &grid)?;
        build_objective(&mut problem, &gains, &grid)?;

        tracing::debug!(
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            "model built"
        );

        Ok(Self {
            investments,
            needs,
            gains,
            grid,
            problem,
            capacity_rows,
            coverage_rows,
        })
    }
}
