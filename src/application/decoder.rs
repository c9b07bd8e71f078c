//! Turns a solved model back into an investment plan.

use super::context::RunContext;
use super::gain_matrix::GainMatrix;
use crate::domain::{AllocationMode, Solution, SolutionStatus};
use std::fmt;

/// One reported (investment, need) allocation
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEntry {
    pub row: usize,
    pub column: usize,
    /// `"<account>@<term>"`
    pub investment: String,
    pub need: String,
    /// Solved share of the need routed through this investment
    pub weight: f64,
    /// `weight × gain`
    pub amount: f64,
}

/// Decoded outcome of one run
#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub status: SolutionStatus,
    pub message: String,
    pub objective_value: Option<f64>,
    pub investment_labels: Vec<String>,
    pub need_names: Vec<String>,
    pub gains: GainMatrix,
    /// `weight × gain` for every cell; empty without a solution
    pub allocations: Vec<Vec<f64>>,
    pub entries: Vec<AllocationEntry>,
    /// Capacity usage per account, in constraint order
    pub account_totals: Vec<(String, f64)>,
    /// Funded amount per need, in column order
    pub need_coverage: Vec<(String, f64)>,
}

impl AllocationReport {
    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    pub fn allocation(&self, row: usize, col: usize) -> f64 {
        self.allocations
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn account_total(&self, account: &str) -> Option<f64> {
        self.account_totals
            .iter()
            .find(|(name, _)| name == account)
            .map(|(_, total)| *total)
    }

    pub fn coverage(&self, need: &str) -> Option<f64> {
        self.need_coverage
            .iter()
            .find(|(name, _)| name == need)
            .map(|(_, total)| *total)
    }
}

/// Decodes `solution` against the model it was solved from.
///
/// Without an Optimal/Feasible status there is no allocation. Otherwise every
/// cell whose `|weight × gain|` exceeds `materiality_threshold` is reported; in
/// whole-need mode only variables above 0.5 count as chosen.
pub fn decode(
    context: &RunContext,
    solution: &Solution,
    mode: AllocationMode,
    materiality_threshold: f64,
) -> AllocationReport {
    let mut report = AllocationReport {
        status: solution.status,
        message: solution.message.clone(),
        objective_value: None,
        investment_labels: context.investments.iter().map(|inv| inv.label()).collect(),
        need_names: context.needs.iter().map(|n| n.name().to_string()).collect(),
        gains: context.gains.clone(),
        allocations: Vec::new(),
        entries: Vec::new(),
        account_totals: Vec::new(),
        need_coverage: Vec::new(),
    };

    if !solution.is_feasible() {
        tracing::warn!(status = %solution.status, message = %solution.message, "no solution found");
        return report;
    }

    report.objective_value = solution.objective_value;
    report.allocations = (0..context.gains.rows())
        .map(|r| {
            (0..context.gains.cols())
                .map(|c| solution.value(context.grid.get(r, c)) * context.gains.get(r, c))
                .collect()
        })
        .collect();

    for r in 0..context.gains.rows() {
        for c in 0..context.gains.cols() {
            let weight = solution.value(context.grid.get(r, c));
            let amount = report.allocations[r][c];
            let reported = match mode.selection_threshold() {
                Some(threshold) => weight > threshold,
                None => amount.abs() > materiality_threshold,
            };
            if reported {
                report.entries.push(AllocationEntry {
                    row: r,
                    column: c,
                    investment: report.investment_labels[r].clone(),
                    need: report.need_names[c].clone(),
                    weight,
                    amount,
                });
            }
        }
    }

    let values = &solution.variable_values;
    report.account_totals = context
        .capacity_rows
        .iter()
        .map(|&id| {
            let row = context.problem.constraint(id);
            (row.name.clone(), row.activity(values))
        })
        .collect();
    report.need_coverage = context
        .coverage_rows
        .iter()
        .map(|&id| {
            let row = context.problem.constraint(id);
            (row.name.clone(), row.activity(values))
        })
        .collect();

    tracing::info!(
        status = %report.status,
        objective = report.objective_value.unwrap_or_default(),
        entries = report.entries.len(),
        "solution decoded"
    );

    report
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gains:")?;
        write!(f, "{}", self.gains)?;
        writeln!(f)?;

        if !self.has_solution() {
            return writeln!(f, "No solution found. ({}: {})", self.status, self.message);
        }

        writeln!(
            f,
            "Total gain: {:.2}\n",
            self.objective_value.unwrap_or_default()
        )?;

        write!(f, "\t")?;
        for need in &self.need_names {
            write!(f, "{}\t", need)?;
        }
        writeln!(f)?;

        for (label, row) in self.investment_labels.iter().zip(&self.allocations) {
            write!(f, "{}\t", label)?;
            for cell in row {
                write!(f, "{:.2}\t", cell)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        for (account, total) in &self.account_totals {
            writeln!(f, "{}: {:.2}", account, total)?;
        }
        Ok(())
    }
}
