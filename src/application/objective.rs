use super::gain_matrix::GainMatrix;
use super::model_builder::VariableGrid;
use crate::domain::{OptimizationProblem, Result};

/// Uses each gain cell as the objective coefficient of its variable and
/// maximizes total payoff.
pub fn build_objective(
    problem: &mut OptimizationProblem,
    gains: &GainMatrix,
    grid: &VariableGrid,
) -> Result<()> {
    grid.ensure_matches(gains)?;

    let objective = problem.objective_mut();
    for r in 0..gains.rows() {
        for c in 0..gains.cols() {
            objective.set_coefficient(grid.get(r, c), gains.get(r, c));
        }
    }
    objective.set_maximization();

    Ok(())
}
