// Contract for whatever feeds raw records into a run (CSV files, fixtures, ...)

use super::errors::Result;
use chrono::NaiveDate;

/// One row of the investments table
#[derive(Debug, Clone, PartialEq)]
pub struct RawInvestment {
    pub name: String,
    pub term: u32,
    /// Annual rate in percent
    pub rate: f64,
}

/// One row of the needs table. At least one of the two due fields is set.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNeed {
    pub name: String,
    pub amount: f64,
    pub days_until_due: Option<u32>,
    pub due_date: Option<NaiveDate>,
}

/// One row of the limits table
#[derive(Debug, Clone, PartialEq)]
pub struct RawLimits {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

/// Raw entity lists as loaded, before any validation
#[derive(Debug, Clone, Default)]
pub struct RawData {
    pub investments: Vec<RawInvestment>,
    pub needs: Vec<RawNeed>,
    pub limits: Vec<RawLimits>,
}

pub trait DataSource {
    /// Loads every table; fails with `PlannerError::DataSource` when unreadable
    fn load(&self) -> Result<RawData>;
}

/// Already-loaded data, used by tests and embedding callers
impl DataSource for RawData {
    fn load(&self) -> Result<RawData> {
        Ok(self.clone())
    }
}
