// Domain value objects shared by the model builder, the solvers and the report

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of decision variable in the optimization problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous real number within its bounds
    Continuous,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationType {
    /// Minimize the objective function
    #[default]
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Status reported by a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Found feasible solution (may not be optimal)
    Feasible,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// The backend gave up or failed numerically
    Abnormal,
    /// The problem was never handed to a backend
    NotSolved,
}

impl SolutionStatus {
    /// Whether the status carries usable variable values
    pub fn has_solution(&self) -> bool {
        matches!(self, SolutionStatus::Optimal | SolutionStatus::Feasible)
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Feasible => write!(f, "Feasible"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::Abnormal => write!(f, "Abnormal"),
            SolutionStatus::NotSolved => write!(f, "Not Solved"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Pick the strongest backend compiled into this build
    #[default]
    Auto,
    /// Pure Rust simplex (always available)
    #[serde(rename = "microlp")]
    #[value(name = "microlp")]
    MicroLp,
    /// COIN-OR CBC
    #[value(name = "coin_cbc")]
    CoinCbc,
    /// HiGHS
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::MicroLp => write!(f, "microlp"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

/// How a need may be split across investments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Fractional weights in [0, 1]; a need may be split across investments
    #[default]
    Fractional,
    /// Binary weights; each need goes to exactly one investment
    Whole,
}

impl AllocationMode {
    /// Weight above which a solved variable counts as "chosen"
    pub fn selection_threshold(&self) -> Option<f64> {
        match self {
            AllocationMode::Fractional => None,
            AllocationMode::Whole => Some(0.5),
        }
    }
}

/// Identity policy used when collapsing investments that share an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Hash and compare on the full account name
    #[default]
    FullName,
    /// Legacy: hash on the first character only, full name breaks ties
    FirstCharacter,
}
