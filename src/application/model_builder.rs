//! Decision variables and constraints of the allocation model.
//!
//! `x[r][c]` is the share of need `c` funded through investment row `r`.
//! Two constraint families are emitted:
//!
//! - capacity: for each account, `min <= Σ gain[r][c]·x[r][c] <= max` over
//!   every row of that account, wherever those rows sit in the matrix;
//! - coverage: for each need, `Σ amount·x[r][c] = amount` over the eligible
//!   rows, so a need is funded exactly once.

use super::catalog::distinct;
use super::gain_matrix::GainMatrix;
use crate::domain::{
    AllocationMode, Constraint, ConstraintId, DedupPolicy, Investment, Need, OptimizationProblem,
    PlannerError, Result, Variable, VariableId,
};

/// One variable per gain-matrix cell
#[derive(Debug, Clone, PartialEq)]
pub struct VariableGrid {
    ids: Vec<Vec<VariableId>>,
    cols: usize,
}

impl VariableGrid {
    pub fn rows(&self) -> usize {
        self.ids.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> VariableId {
        self.ids[row][col]
    }

    /// Fails unless the grid and `gains` have the same shape
    pub fn ensure_matches(&self, gains: &GainMatrix) -> Result<()> {
        if self.rows() != gains.rows() || self.cols() != gains.cols() {
            return Err(PlannerError::DimensionMismatch(format!(
                "variable grid is {}x{} but gain matrix is {}x{}",
                self.rows(),
                self.cols(),
                gains.rows(),
                gains.cols()
            )));
        }
        Ok(())
    }
}

/// Creates a `rows × cols` grid of allocation variables bounded to [0, 1]
pub fn build_variables(
    problem: &mut OptimizationProblem,
    rows: usize,
    cols: usize,
    mode: AllocationMode,
) -> VariableGrid {
    let ids = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let name = format!("x_{}_{}", r, c);
                    let variable = match mode {
                        AllocationMode::Fractional => Variable::continuous(name, 0.0, 1.0),
                        AllocationMode::Whole => Variable::binary(name),
                    };
                    problem.add_variable(variable)
                })
                .collect()
        })
        .collect();

    VariableGrid { ids, cols }
}

/// Adds one capacity constraint per distinct account.
///
/// Bounds come from the first-seen tier of each account.
pub fn add_capacity_constraints(
    problem: &mut OptimizationProblem,
    investments: &[Investment],
    gains: &GainMatrix,
    grid: &VariableGrid,
    policy: DedupPolicy,
) -> Result<Vec<ConstraintId>> {
    grid.ensure_matches(gains)?;
    if investments.len() != gains.rows() {
        return Err(PlannerError::DimensionMismatch(format!(
            "{} investments for {} gain matrix rows",
            investments.len(),
            gains.rows()
        )));
    }

    let ids = distinct(investments, policy)
        .iter()
        .map(|account| {
            let id = problem.add_constraint(Constraint::new(
                account.min_investment(),
                account.max_investment(),
                account.account_name(),
            ));

            for (r, _) in investments
                .iter()
                .enumerate()
                .filter(|(_, inv)| inv.same_account(account))
            {
                for c in 0..gains.cols() {
                    problem
                        .constraint_mut(id)
                        .set_coefficient(grid.get(r, c), gains.get(r, c));
                }
            }
            id
        })
        .collect();

    Ok(ids)
}

/// Adds one exact-coverage constraint per need
pub fn add_coverage_constraints(
    problem: &mut OptimizationProblem,
    needs: &[Need],
    gains: &GainMatrix,
    grid: &VariableGrid,
) -> Result<Vec<ConstraintId>> {
    grid.ensure_matches(gains)?;
    if needs.len() != gains.cols() {
        return Err(PlannerError::DimensionMismatch(format!(
            "{} needs for {} gain matrix columns",
            needs.len(),
            gains.cols()
        )));
    }

    let ids = needs
        .iter()
        .enumerate()
        .map(|(c, need)| {
            let id = problem.add_constraint(Constraint::equal_to(need.amount(), need.name()));
            for r in 0..gains.rows() {
                if gains.get(r, c) != 0.0 {
                    problem
                        .constraint_mut(id)
                        .set_coefficient(grid.get(r, c), need.amount());
                }
            }
            id
        })
        .collect();

    Ok(ids)
}
