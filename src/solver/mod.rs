// Solver adapters: concrete implementations of SolverService

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
pub mod factory;
mod good_lp_model;
#[cfg(feature = "highs")]
pub mod highs_solver;
pub mod microlp_solver;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use factory::SolverFactory;
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
pub use microlp_solver::MicroLpSolver;

use crate::domain::{OptimizationProblem, Solution, SolutionStatus, SolverStatistics};

/// Decides problems a backend never needs to see.
///
/// Rows whose coefficients are all zero and whose bounds exclude zero (for
/// example `0 = amount` for a need nothing can fund) make the problem
/// infeasible. A problem without variables whose constant rows all hold is
/// trivially optimal at 0. Returns `None` when a backend has to decide.
pub(crate) fn screen_constant_rows(problem: &OptimizationProblem) -> Option<Solution> {
    let statistics = SolverStatistics::for_problem(problem, 0.0);

    if let Some(violated) = problem
        .constraints()
        .iter()
        .find(|c| c.is_constant() && !c.is_satisfied_by_zero())
    {
        tracing::debug!(constraint = %violated.name, "constant row excludes zero");
        return Some(
            Solution::new(
                SolutionStatus::Infeasible,
                format!(
                    "Problem is infeasible: constraint '{}' has no variables but requires [{}, {}]",
                    violated.name, violated.lower_bound, violated.upper_bound
                ),
            )
            .with_statistics(statistics),
        );
    }

    if problem.num_variables() == 0 {
        tracing::debug!("problem has no variables");
        let mut solution = Solution::optimal(0.0, Vec::new());
        solution.message = format!("'{}' has no variables", problem.name);
        return Some(solution.with_statistics(statistics));
    }

    None
}
