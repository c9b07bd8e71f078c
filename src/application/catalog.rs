//! Entity catalog: turns raw loaded records into validated entities.
//!
//! Every investment must resolve its capacity bounds from a limits entry with
//! the same account name; a missing entry is a configuration error.

use crate::domain::{
    DedupPolicy, Investment, InvestmentLimits, Need, PlannerError, RawData, Result,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Validated entities for one run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub investments: Vec<Investment>,
    pub needs: Vec<Need>,
    pub limits: HashMap<String, InvestmentLimits>,
}

impl Catalog {
    /// Builds the catalog from raw records. Due dates resolve against `as_of`.
    pub fn load(raw: RawData, as_of: NaiveDate) -> Result<Self> {
        let mut limits = HashMap::with_capacity(raw.limits.len());
        for entry in raw.limits {
            if !entry.min.is_finite() || !entry.max.is_finite() {
                return Err(PlannerError::Configuration(format!(
                    "limits for '{}' must be finite, got [{}, {}]",
                    entry.name, entry.min, entry.max
                )));
            }
            if entry.min > entry.max {
                return Err(PlannerError::Configuration(format!(
                    "limits for '{}' have min ({}) > max ({})",
                    entry.name, entry.min, entry.max
                )));
            }
            let name = entry.name.clone();
            if limits
                .insert(name.clone(), InvestmentLimits::new(entry.name, entry.min, entry.max))
                .is_some()
            {
                tracing::warn!(account = %name, "duplicate limits entry, keeping the last one");
            }
        }

        let investments = raw
            .investments
            .into_iter()
            .map(|entry| {
                if !entry.rate.is_finite() {
                    return Err(PlannerError::InvalidEntity(format!(
                        "investment '{}@{}' has a non-finite rate ({})",
                        entry.name, entry.term, entry.rate
                    )));
                }
                let account_limits = limits.get(&entry.name).ok_or_else(|| {
                    PlannerError::Configuration(format!(
                        "no limits entry for investment account '{}'",
                        entry.name
                    ))
                })?;
                Ok(Investment::new(entry.name, entry.rate, entry.term, account_limits))
            })
            .collect::<Result<Vec<_>>>()?;

        let needs = raw
            .needs
            .into_iter()
            .map(|entry| match (entry.days_until_due, entry.due_date) {
                (Some(days), _) => Need::new(entry.name, entry.amount, days),
                (None, Some(due_date)) => {
                    Need::with_due_date(entry.name, entry.amount, due_date, as_of)
                }
                (None, None) => Err(PlannerError::InvalidEntity(format!(
                    "need '{}' has neither days until due nor a due date",
                    entry.name
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            investments = investments.len(),
            needs = needs.len(),
            accounts = limits.len(),
            "catalog loaded"
        );

        Ok(Self {
            investments,
            needs,
            limits,
        })
    }

    pub fn active_investments(&self) -> Vec<Investment> {
        self.investments
            .iter()
            .filter(|inv| inv.is_active())
            .cloned()
            .collect()
    }

    pub fn active_needs(&self) -> Vec<Need> {
        self.needs.iter().filter(|n| n.is_active()).cloned().collect()
    }
}

/// Removes investments whose account name was already seen, keeping
/// first-seen order.
pub fn distinct(investments: &[Investment], policy: DedupPolicy) -> Vec<Investment> {
    match policy {
        DedupPolicy::FullName => retain_first_seen(investments, |inv| inv.account_name()),
        DedupPolicy::FirstCharacter => {
            retain_first_seen(investments, |inv| FirstCharacterKey(inv.account_name()))
        }
    }
}

fn retain_first_seen<'a, K: Hash + Eq>(
    investments: &'a [Investment],
    key: impl Fn(&'a Investment) -> K,
) -> Vec<Investment> {
    let mut seen = HashSet::new();
    investments
        .iter()
        .filter(|inv| seen.insert(key(*inv)))
        .cloned()
        .collect()
}

/// Hashes on the first character only; equality still compares the full
/// name, so distinct names sharing an initial land in one bucket but stay
/// distinct.
struct FirstCharacterKey<'a>(&'a str);

impl Hash for FirstCharacterKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.chars().next().hash(state);
    }
}

impl PartialEq for FirstCharacterKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for FirstCharacterKey<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawInvestment, RawLimits, RawNeed};
    use rstest::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[fixture]
    fn raw() -> RawData {
        RawData {
            investments: vec![
                RawInvestment {
                    name: "Banamex".into(),
                    term: 1,
                    rate: 2.0,
                },
                RawInvestment {
                    name: "Bancomer".into(),
                    term: 30,
                    rate: 3.0,
                },
                RawInvestment {
                    name: "Banamex".into(),
                    term: 30,
                    rate: 2.5,
                },
            ],
            needs: vec![
                RawNeed {
                    name: "Carro".into(),
                    amount: 200_000.0,
                    days_until_due: Some(360),
                    due_date: None,
                },
                RawNeed {
                    name: "Navidad".into(),
                    amount: 15_000.0,
                    days_until_due: None,
                    due_date: NaiveDate::from_ymd_opt(2024, 6, 29),
                },
            ],
            limits: vec![
                RawLimits {
                    name: "Banamex".into(),
                    min: 0.0,
                    max: 1_000_000.0,
                },
                RawLimits {
                    name: "Bancomer".into(),
                    min: 10.0,
                    max: 50_000.0,
                },
            ],
        }
    }

    #[rstest]
    fn load_resolves_bounds_and_due_dates(raw: RawData) {
        let catalog = Catalog::load(raw, as_of()).unwrap();

        assert_eq!(catalog.investments.len(), 3);
        assert_eq!(catalog.investments[1].min_investment(), 10.0);
        assert_eq!(catalog.investments[1].max_investment(), 50_000.0);
        assert_eq!(catalog.needs[0].days_until_due(), 360);
        assert_eq!(catalog.needs[1].days_until_due(), 180);
    }

    #[rstest]
    fn missing_limits_is_a_configuration_error(mut raw: RawData) {
        raw.investments.push(RawInvestment {
            name: "Kubo".into(),
            term: 360,
            rate: 10.0,
        });

        let err = Catalog::load(raw, as_of()).unwrap_err();
        assert!(matches!(err, PlannerError::Configuration(msg) if msg.contains("Kubo")));
    }

    #[rstest]
    #[case::nan_min(f64::NAN, 1_000.0)]
    #[case::nan_max(0.0, f64::NAN)]
    #[case::unbounded_max(0.0, f64::INFINITY)]
    #[case::unbounded_min(f64::NEG_INFINITY, 1_000.0)]
    fn non_finite_limits_are_a_configuration_error(
        mut raw: RawData,
        #[case] min: f64,
        #[case] max: f64,
    ) {
        raw.limits[0].min = min;
        raw.limits[0].max = max;

        let err = Catalog::load(raw, as_of()).unwrap_err();
        assert!(matches!(err, PlannerError::Configuration(msg) if msg.contains("Banamex")));
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn non_finite_rate_is_rejected(mut raw: RawData, #[case] rate: f64) {
        raw.investments[0].rate = rate;

        let err = Catalog::load(raw, as_of()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidEntity(msg) if msg.contains("Banamex@1")));
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn non_finite_need_amount_is_rejected(mut raw: RawData, #[case] amount: f64) {
        raw.needs[0].amount = amount;
        assert!(matches!(
            Catalog::load(raw, as_of()),
            Err(PlannerError::InvalidEntity(_))
        ));
    }

    #[rstest]
    fn need_without_due_information_is_rejected(mut raw: RawData) {
        raw.needs[0].days_until_due = None;
        assert!(matches!(
            Catalog::load(raw, as_of()),
            Err(PlannerError::InvalidEntity(_))
        ));
    }

    #[rstest]
    #[case::full_name(DedupPolicy::FullName)]
    #[case::first_character(DedupPolicy::FirstCharacter)]
    fn distinct_keeps_first_tier_per_account(raw: RawData, #[case] policy: DedupPolicy) {
        let catalog = Catalog::load(raw, as_of()).unwrap();
        let accounts = distinct(&catalog.investments, policy);

        // Banamex and Bancomer share an initial but are different accounts
        let labels: Vec<String> = accounts.iter().map(Investment::label).collect();
        assert_eq!(labels, vec!["Banamex@1", "Bancomer@30"]);
    }

    #[test]
    fn same_account_and_term_collapses_to_one() {
        let limits = InvestmentLimits::new("Kubo", 0.0, 1.0);
        let investments = vec![
            Investment::new("Kubo", 10.0, 360, &limits),
            Investment::new("Kubo", 10.0, 360, &limits),
        ];

        assert_eq!(distinct(&investments, DedupPolicy::FullName).len(), 1);
        assert_eq!(distinct(&investments, DedupPolicy::FirstCharacter).len(), 1);
    }

    #[rstest]
    fn inactive_entities_are_filtered(raw: RawData) {
        let mut catalog = Catalog::load(raw, as_of()).unwrap();
        catalog.investments[0].deactivate();
        catalog.needs[1].deactivate();

        assert_eq!(catalog.active_investments().len(), 2);
        assert_eq!(catalog.active_needs().len(), 1);
    }
}
