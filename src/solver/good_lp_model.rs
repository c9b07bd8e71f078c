// Translation of the domain model into a good_lp problem.
// Shared by every backend that good_lp drives (microlp, CBC).

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::Result,
    value_objects::{OptimizationType, SolutionStatus, VariableType},
};
use good_lp::{
    solvers::Solver, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

/// Builds `problem` with good_lp and solves it with `backend`
pub(crate) fn solve_with<S>(problem: &OptimizationProblem, backend: S) -> Result<DomainSolution>
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
{
    let start_time = Instant::now();

    if let Some(solution) = super::screen_constant_rows(problem) {
        return Ok(solution);
    }

    let mut vars = variables!();
    let lp_variables: Vec<GoodLpVariable> = problem
        .variables()
        .iter()
        .map(|var_def| match var_def.variable_type {
            VariableType::Binary => vars.add(variable().binary()),
            VariableType::Continuous => {
                let mut definition = variable();
                if var_def.lower_bound.is_finite() {
                    definition = definition.min(var_def.lower_bound);
                }
                if var_def.upper_bound.is_finite() {
                    definition = definition.max(var_def.upper_bound);
                }
                vars.add(definition)
            }
        })
        .collect();

    let mut obj_expr: Expression = 0.into();
    for (var, coeff) in problem.objective().coefficients() {
        if *coeff != 0.0 {
            obj_expr += *coeff * lp_variables[var.index()];
        }
    }

    let unsolved = match problem.objective().optimization_type {
        OptimizationType::Maximize => vars.maximise(obj_expr),
        OptimizationType::Minimize => vars.minimise(obj_expr),
    };
    let mut lp_model = unsolved.using(backend);

    for constraint in problem.constraints() {
        if constraint.is_constant() {
            continue;
        }

        let mut lhs: Expression = 0.into();
        for (var, coeff) in constraint.coefficients() {
            if *coeff != 0.0 {
                lhs += *coeff * lp_variables[var.index()];
            }
        }

        if constraint.is_equality() {
            lp_model = lp_model.with(lhs.eq(constraint.lower_bound));
        } else {
            if constraint.lower_bound.is_finite() {
                lp_model = lp_model.with(lhs.clone().geq(constraint.lower_bound));
            }
            if constraint.upper_bound.is_finite() {
                lp_model = lp_model.with(lhs.leq(constraint.upper_bound));
            }
        }
    }

    let solution_result = lp_model.solve();
    let statistics =
        SolverStatistics::for_problem(problem, start_time.elapsed().as_secs_f64() * 1000.0);

    let solution = match solution_result {
        Ok(sol) => {
            let variable_values: Vec<f64> = lp_variables.iter().map(|&var| sol.value(var)).collect();
            let actual_obj = problem.objective().evaluate(&variable_values);

            let mut solution = DomainSolution::optimal(actual_obj, variable_values);
            solution.message = format!("Optimal solution found for '{}'", problem.name);
            solution
        }
        Err(ResolutionError::Infeasible) => DomainSolution::new(
            SolutionStatus::Infeasible,
            "Problem is infeasible: no solution satisfies all constraints",
        ),
        Err(ResolutionError::Unbounded) => DomainSolution::new(
            SolutionStatus::Unbounded,
            "Problem is unbounded: objective can be improved infinitely",
        ),
        Err(e) => DomainSolution::new(SolutionStatus::Abnormal, format!("{}", e)),
    };

    Ok(solution.with_statistics(statistics))
}
