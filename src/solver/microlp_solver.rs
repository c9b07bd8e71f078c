use crate::domain::{
    models::{OptimizationProblem, Solution},
    solver_service::{Result, SolverService},
};
use good_lp::solvers::microlp::microlp;

/// Pure Rust simplex with branch-and-bound for binary variables
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution> {
        self.validate(problem)?;
        super::good_lp_model::solve_with(problem, microlp)
    }

    fn name(&self) -> &str {
        "microlp"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Constraint, SolutionStatus, Variable};
    use approx::assert_relative_eq;

    // maximize 30x + 50y  s.t.  2x + 3y <= 100,  x + y <= 40
    fn production_plan() -> OptimizationProblem {
        let mut problem = OptimizationProblem::new("production");
        let x = problem.add_variable(Variable::continuous("chairs", 0.0, f64::INFINITY));
        let y = problem.add_variable(Variable::continuous("tables", 0.0, f64::INFINITY));

        let labor = problem.add_constraint(Constraint::new(f64::NEG_INFINITY, 100.0, "labor"));
        problem.constraint_mut(labor).set_coefficient(x, 2.0);
        problem.constraint_mut(labor).set_coefficient(y, 3.0);

        let storage = problem.add_constraint(Constraint::new(f64::NEG_INFINITY, 40.0, "storage"));
        problem.constraint_mut(storage).set_coefficient(x, 1.0);
        problem.constraint_mut(storage).set_coefficient(y, 1.0);

        problem.objective_mut().set_coefficient(x, 30.0);
        problem.objective_mut().set_coefficient(y, 50.0);
        problem.objective_mut().set_maximization();
        problem
    }

    #[test]
    fn solves_production_plan() {
        let solution = MicroLpSolver::new().solve(&production_plan()).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        // labor binds first: tables alone earn 50/3 per labor hour against 15 for chairs
        assert_relative_eq!(solution.objective_value.unwrap(), 5000.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(solution.variable_values[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(solution.variable_values[1], 100.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn reports_infeasible_equality() {
        let mut problem = OptimizationProblem::new("infeasible");
        let x = problem.add_variable(Variable::continuous("x", 0.0, 1.0));
        let c = problem.add_constraint(Constraint::equal_to(5.0, "too_much"));
        problem.constraint_mut(c).set_coefficient(x, 1.0);
        problem.objective_mut().set_coefficient(x, 1.0);

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.variable_values.is_empty());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut problem = OptimizationProblem::new("broken");
        problem.add_variable(Variable::continuous("x", 2.0, 1.0));

        assert!(MicroLpSolver::new().solve(&problem).is_err());
    }
}
