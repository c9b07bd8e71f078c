use super::value_objects::{OptimizationType, SolutionStatus, VariableType};
use std::collections::HashSet;
use std::fmt::Write as _;

/// Handle to a variable created through [`OptimizationProblem::add_variable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle to a constraint created through [`OptimizationProblem::add_constraint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

/// Decision variable in an optimization problem
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound,
            upper_bound,
            name: name.into(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: 1.0,
            name: name.into(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.variable_type, VariableType::Binary)
    }
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone, Default)]
pub struct ObjectiveFunction {
    pub optimization_type: OptimizationType,
    coefficients: Vec<(VariableId, f64)>,
}

impl ObjectiveFunction {
    /// Sets the coefficient of `variable`, replacing any previous value
    pub fn set_coefficient(&mut self, variable: VariableId, value: f64) {
        set_sparse(&mut self.coefficients, variable, value);
    }

    pub fn set_maximization(&mut self) {
        self.optimization_type = OptimizationType::Maximize;
    }

    pub fn coefficients(&self) -> &[(VariableId, f64)] {
        &self.coefficients
    }

    pub fn coefficient(&self, variable: VariableId) -> f64 {
        get_sparse(&self.coefficients, variable)
    }

    /// Coefficients laid out by variable index
    pub fn dense(&self, num_variables: usize) -> Vec<f64> {
        let mut dense = vec![0.0; num_variables];
        for (var, coeff) in &self.coefficients {
            if let Some(slot) = dense.get_mut(var.index()) {
                *slot = *coeff;
            }
        }
        dense
    }

    /// Evaluates the objective at the given variable values
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .map(|(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Linear constraint `lower <= Σ coeff·x <= upper`
#[derive(Debug, Clone)]
pub struct Constraint {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
    coefficients: Vec<(VariableId, f64)>,
}

impl Constraint {
    pub fn new(lower_bound: f64, upper_bound: f64, name: impl Into<String>) -> Self {
        Self {
            lower_bound,
            upper_bound,
            name: name.into(),
            coefficients: Vec::new(),
        }
    }

    pub fn equal_to(value: f64, name: impl Into<String>) -> Self {
        Self::new(value, value, name)
    }

    /// Sets the coefficient of `variable`, replacing any previous value
    pub fn set_coefficient(&mut self, variable: VariableId, value: f64) {
        set_sparse(&mut self.coefficients, variable, value);
    }

    pub fn coefficients(&self) -> &[(VariableId, f64)] {
        &self.coefficients
    }

    pub fn coefficient(&self, variable: VariableId) -> f64 {
        get_sparse(&self.coefficients, variable)
    }

    /// True when every coefficient is zero, so the row reduces to `lower <= 0 <= upper`
    pub fn is_constant(&self) -> bool {
        self.coefficients.iter().all(|(_, c)| *c == 0.0)
    }

    pub fn is_satisfied_by_zero(&self) -> bool {
        self.lower_bound <= 0.0 && 0.0 <= self.upper_bound
    }

    pub fn is_equality(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// Evaluates the left-hand side at the given variable values
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .map(|(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

fn set_sparse(entries: &mut Vec<(VariableId, f64)>, variable: VariableId, value: f64) {
    match entries.iter_mut().find(|(var, _)| *var == variable) {
        Some(entry) => entry.1 = value,
        None => entries.push((variable, value)),
    }
}

fn get_sparse(entries: &[(VariableId, f64)], variable: VariableId) -> f64 {
    entries
        .iter()
        .find(|(var, _)| *var == variable)
        .map(|(_, value)| *value)
        .unwrap_or(0.0)
}

/// Complete optimization problem, owned by a single run
#[derive(Debug, Clone, Default)]
pub struct OptimizationProblem {
    pub name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: ObjectiveFunction,
}

impl OptimizationProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        self.variables.push(variable);
        VariableId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        self.constraints.push(constraint);
        ConstraintId(self.constraints.len() - 1)
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.0]
    }

    pub fn constraint_mut(&mut self, id: ConstraintId) -> &mut Constraint {
        &mut self.constraints[id.0]
    }

    pub fn objective(&self) -> &ObjectiveFunction {
        &self.objective
    }

    pub fn objective_mut(&mut self) -> &mut ObjectiveFunction {
        &mut self.objective
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }

    /// Renders the problem in CPLEX LP format
    ///
    /// Names are sanitised to `[A-Za-z0-9_]` and suffixed when two of them
    /// collide. Infinite bounds become one-sided rows or `free` bounds.
    pub fn to_lp_format(&self) -> String {
        let mut out = String::new();
        let columns = unique_lp_names(self.variables.iter().map(|v| v.name.as_str()), "x");
        let rows = unique_lp_names(self.constraints.iter().map(|c| c.name.as_str()), "c");
        let name = |id: &VariableId| columns[id.0].clone();

        let _ = writeln!(out, "\\ {}", self.name);
        let _ = writeln!(
            out,
            "{}",
            match self.objective.optimization_type {
                OptimizationType::Maximize => "Maximize",
                OptimizationType::Minimize => "Minimize",
            }
        );
        let _ = writeln!(out, " obj: {}", lp_expression(&self.objective.coefficients, name));

        let _ = writeln!(out, "Subject To");
        for (constraint, label) in self.constraints.iter().zip(&rows) {
            let expr = lp_expression(&constraint.coefficients, name);
            let (lo, hi) = (constraint.lower_bound, constraint.upper_bound);
            let _ = match (lo.is_finite(), hi.is_finite()) {
                _ if constraint.is_equality() => writeln!(out, " {}: {} = {}", label, expr, lo),
                (true, true) => writeln!(out, " {}: {} <= {} <= {}", label, lo, expr, hi),
                (true, false) => writeln!(out, " {}: {} >= {}", label, expr, lo),
                (false, true) => writeln!(out, " {}: {} <= {}", label, expr, hi),
                (false, false) => writeln!(out, "\\ {}: {} is unbounded", label, expr),
            };
        }

        let _ = writeln!(out, "Bounds");
        for (var, column) in self.variables.iter().zip(&columns) {
            let (lo, hi) = (var.lower_bound, var.upper_bound);
            let _ = match (lo.is_finite(), hi.is_finite()) {
                (true, true) => writeln!(out, " {} <= {} <= {}", lo, column, hi),
                (true, false) => writeln!(out, " {} >= {}", column, lo),
                (false, true) => writeln!(out, " -inf <= {} <= {}", column, hi),
                (false, false) => writeln!(out, " {} free", column),
            };
        }

        let binaries: Vec<&str> = self
            .variables
            .iter()
            .zip(&columns)
            .filter(|(v, _)| v.is_integer())
            .map(|(_, column)| column.as_str())
            .collect();
        if !binaries.is_empty() {
            let _ = writeln!(out, "Binary");
            let _ = writeln!(out, " {}", binaries.join(" "));
        }

        let _ = writeln!(out, "End");
        out
    }
}

fn lp_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Sanitised names, one per input, with `_2`, `_3`... appended on collision
fn unique_lp_names<'a>(raw: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.enumerate()
        .map(|(i, name)| {
            let base = if name.is_empty() {
                format!("{}{}", prefix, i)
            } else {
                lp_name(name)
            };
            let mut candidate = base.clone();
            let mut n = 1;
            while !seen.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{}_{}", base, n);
            }
            candidate
        })
        .collect()
}

fn lp_expression(terms: &[(VariableId, f64)], name: impl Fn(&VariableId) -> String) -> String {
    let rendered: Vec<String> = terms
        .iter()
        .filter(|(_, coeff)| *coeff != 0.0)
        .map(|(var, coeff)| format!("{} {}", coeff, name(var)))
        .collect();

    if rendered.is_empty() {
        "0".to_string()
    } else {
        rendered.join(" + ")
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_binary_vars: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &OptimizationProblem, solve_time_ms: f64) -> Self {
        Self {
            solve_time_ms,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.num_constraints() as u32,
            num_binary_vars: problem.num_integer_variables() as u32,
        }
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            objective_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// Solved value of `variable`, 0.0 when the solve produced no values
    pub fn value(&self, variable: VariableId) -> f64 {
        self.variable_values
            .get(variable.index())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_feasible(&self) -> bool {
        self.status.has_solution()
    }
}
