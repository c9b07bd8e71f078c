// Domain service interface for solving optimization problems
// Every backend adapter implements this trait; the planner only sees the trait

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for LP/MIP solvers
///
/// A solver is owned by exactly one run. Infeasible, unbounded or abnormal
/// outcomes are reported through [`Solution::status`], not as errors.
pub trait SolverService {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        for (var, _) in problem.objective().coefficients() {
            if var.index() >= num_vars {
                errors.push(format!(
                    "Objective references unknown variable {}",
                    var.index()
                ));
            }
        }

        for (i, constraint) in problem.constraints().iter().enumerate() {
            if constraint.lower_bound > constraint.upper_bound {
                errors.push(format!(
                    "Constraint {} '{}' has lower bound ({}) > upper bound ({})",
                    i, constraint.name, constraint.lower_bound, constraint.upper_bound
                ));
            }
            for (var, _) in constraint.coefficients() {
                if var.index() >= num_vars {
                    errors.push(format!(
                        "Constraint {} '{}' references unknown variable {}",
                        i,
                        constraint.name,
                        var.index()
                    ));
                }
            }
        }

        for (i, var) in problem.variables().iter().enumerate() {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                    i, var.name, var.lower_bound, var.upper_bound
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver can handle binary variables
    fn supports_mip(&self) -> bool;
}
