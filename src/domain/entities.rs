use super::errors::{PlannerError, Result};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Capacity bounds for one account, as read from the limits table
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentLimits {
    pub account_name: String,
    pub min_investment: f64,
    pub max_investment: f64,
}

impl InvestmentLimits {
    pub fn new(account_name: impl Into<String>, min_investment: f64, max_investment: f64) -> Self {
        Self {
            account_name: account_name.into(),
            min_investment,
            max_investment,
        }
    }
}

/// One rate tier of an investment product.
///
/// Several tiers may share an `account_name` and differ only by `term`; they
/// draw from the same capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    account_name: String,
    /// Annual rate in percent (4.5 means 4.5%)
    interest_rate: f64,
    /// Days until the investment matures
    term: u32,
    min_investment: f64,
    max_investment: f64,
    active: bool,
}

impl Investment {
    /// Builds an investment whose bounds come from `limits`
    pub fn new(
        account_name: impl Into<String>,
        interest_rate: f64,
        term: u32,
        limits: &InvestmentLimits,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            interest_rate,
            term,
            min_investment: limits.min_investment,
            max_investment: limits.max_investment,
            active: true,
        }
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Annual rate as a fraction (0.045 for 4.5%)
    pub fn rate_fraction(&self) -> f64 {
        self.interest_rate / 100.0
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn min_investment(&self) -> f64 {
        self.min_investment
    }

    pub fn max_investment(&self) -> f64 {
        self.max_investment
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `"<account>@<term>"`, unique per tier
    pub fn label(&self) -> String {
        format!("{}@{}", self.account_name, self.term)
    }

    pub fn set_interest_rate(&mut self, interest_rate: f64) {
        self.interest_rate = interest_rate;
    }

    pub fn set_bounds(&mut self, min_investment: f64, max_investment: f64) {
        self.min_investment = min_investment;
        self.max_investment = max_investment;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Orders investments by interest rate.
    pub fn compare_rate(&self, other: &Investment) -> Ordering {
        self.interest_rate.total_cmp(&other.interest_rate)
    }

    /// True when both tiers belong to the same account
    pub fn same_account(&self, other: &Investment) -> bool {
        self.account_name == other.account_name
    }
}

/// A future cash obligation that must be fully funded
#[derive(Debug, Clone, PartialEq)]
pub struct Need {
    name: String,
    amount: f64,
    days_until_due: u32,
    due_date: Option<NaiveDate>,
    active: bool,
}

impl Need {
    /// Builds a need that is due `days_until_due` days from now
    pub fn new(name: impl Into<String>, amount: f64, days_until_due: u32) -> Result<Self> {
        let name = name.into();
        if !amount.is_finite() || amount < 0.0 {
            return Err(PlannerError::InvalidEntity(format!(
                "need '{}' has a negative or non-finite amount ({})",
                name, amount
            )));
        }

        Ok(Self {
            name,
            amount,
            days_until_due,
            due_date: None,
            active: true,
        })
    }

    /// Builds a need from a calendar due date, resolved against `as_of`.
    ///
    /// A due date already in the past resolves to zero days.
    pub fn with_due_date(
        name: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<Self> {
        let name = name.into();
        let days = (due_date - as_of).num_days();
        if days < 0 {
            tracing::warn!(need = %name, %due_date, %as_of, "need is past due, treating as due today");
        }
        let days_until_due = u32::try_from(days.max(0)).map_err(|_| {
            PlannerError::InvalidEntity(format!("need '{}' is due too far in the future", name))
        })?;

        let mut need = Self::new(name, amount, days_until_due)?;
        need.due_date = Some(due_date);
        Ok(need)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn days_until_due(&self) -> u32 {
        self.days_until_due
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
