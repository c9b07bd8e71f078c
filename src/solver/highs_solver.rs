// HiGHS Solver Adapter
// Translates the domain model directly into a HiGHS row problem

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverService},
    value_objects::{OptimizationType, SolutionStatus, VariableType},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();

        if let Some(solution) = super::screen_constant_rows(problem) {
            return Ok(solution);
        }

        let mut pb = RowProblem::default();
        let objective = problem.objective().dense(problem.num_variables());

        // Columns first, then rows
        let cols: Vec<_> = problem
            .variables()
            .iter()
            .zip(objective.iter())
            .map(|(var_def, &obj_coeff)| match var_def.variable_type {
                VariableType::Binary => pb.add_integer_column(obj_coeff, 0.0..=1.0),
                VariableType::Continuous => {
                    pb.add_column(obj_coeff, var_def.lower_bound..=var_def.upper_bound)
                }
            })
            .collect();

        for constraint in problem.constraints() {
            if constraint.is_constant() {
                continue;
            }

            let terms: Vec<_> = constraint
                .coefficients()
                .iter()
                .filter(|(_, coeff)| *coeff != 0.0)
                .map(|(var, coeff)| (cols[var.index()], *coeff))
                .collect();

            pb.add_row(constraint.lower_bound..=constraint.upper_bound, &terms);
        }

        let sense = match problem.objective().optimization_type {
            OptimizationType::Maximize => Sense::Maximise,
            OptimizationType::Minimize => Sense::Minimise,
        };

        let solved = pb.optimise(sense).solve();
        let statistics =
            SolverStatistics::for_problem(problem, start_time.elapsed().as_secs_f64() * 1000.0);

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let actual_obj = problem.objective().evaluate(&variable_values);

                let mut solution = DomainSolution::optimal(actual_obj, variable_values);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                solution
            }
            HighsModelStatus::Infeasible => DomainSolution::new(
                SolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                DomainSolution::new(
                    SolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
            }
            status => DomainSolution::new(
                SolutionStatus::Abnormal,
                format!("HiGHS solver returned status: {:?}", status),
            ),
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
