use crate::domain::{Investment, Need};
use std::fmt;

/// Day-count basis for rates
pub const DAYS_IN_YEAR: u32 = 360;

/// Projected payoff of funding each need (column) through each investment (row).
///
/// Cells of ineligible pairs are exactly 0.
#[derive(Debug, Clone, PartialEq)]
pub struct GainMatrix {
    cells: Vec<Vec<f64>>,
    cols: usize,
}

impl GainMatrix {
    /// Builds the matrix. Pure: the same inputs always give the same matrix.
    pub fn build(investments: &[Investment], needs: &[Need]) -> Self {
        let cells = investments
            .iter()
            .map(|investment| {
                needs
                    .iter()
                    .map(|need| {
                        if is_eligible(investment, need) {
                            gain_in_one_year(
                                need.amount(),
                                investment.rate_fraction() / DAYS_IN_YEAR as f64,
                            )
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            cells,
            cols: needs.len(),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row]
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols == 0
    }
}

impl fmt::Display for GainMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{:.2}\t", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// An investment can fund a need when it matures no later than the need is due
pub fn is_eligible(investment: &Investment, need: &Need) -> bool {
    need.days_until_due() >= investment.term()
}

/// Simple daily accrual held for a full year, regardless of the actual due date
pub fn gain_in_one_year(amount: f64, daily_rate: f64) -> f64 {
    amount + amount * daily_rate * DAYS_IN_YEAR as f64
}
