use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the raw salary dataset.
///
/// Every record carries exactly one value per categorical dimension, and the
/// salary is already denominated in USD — no currency conversion happens
/// anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Calendar year the salary was reported for.
    pub year: i32,
    /// Seniority label (e.g., "junior", "senior").
    pub seniority: String,
    /// Contract-type label (e.g., "full-time").
    pub contract: String,
    /// Company-size label (e.g., "small", "large").
    pub company_size: String,
    /// Job role/title.
    pub role: String,
    /// Employer country as an ISO 3166-1 alpha-2 code.
    pub company_location: String,
    /// Remote-work mode label (e.g., "remote", "hybrid", "on-site").
    pub remote: String,
    /// Annual salary in USD. Non-negative.
    pub salary_usd: Decimal,
}

/// The user's active filter choices: one allow-set per filterable dimension.
///
/// A record passes the selection when each of its four dimension values is a
/// member of the corresponding set (AND across dimensions, OR within a set).
/// An empty set in any dimension therefore admits no record at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterSelection {
    /// Builds the fully-inclusive default selection: every distinct value of
    /// every dimension present in `records`.
    pub fn all(records: &[SalaryRecord]) -> Self {
        let mut selection = Self::default();
        for record in records {
            selection.years.insert(record.year);
            selection.seniorities.insert(record.seniority.clone());
            selection.contracts.insert(record.contract.clone());
            selection.company_sizes.insert(record.company_size.clone());
        }
        selection
    }

    /// Returns true when `record` satisfies all four membership predicates.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contracts.contains(&record.contract)
            && self.company_sizes.contains(&record.company_size)
    }

    /// Checks the invariant that every selected value actually occurs in the
    /// dataset. Rejects typos before they silently produce an empty view.
    pub fn validate(&self, records: &[SalaryRecord]) -> Result<(), CoreError> {
        let available = Self::all(records);
        if let Some(year) = self.years.difference(&available.years).next() {
            return Err(CoreError::UnknownSelectionValue(
                "year".to_string(),
                year.to_string(),
            ));
        }
        for (label, chosen, known) in [
            ("seniority", &self.seniorities, &available.seniorities),
            ("contract", &self.contracts, &available.contracts),
            ("company size", &self.company_sizes, &available.company_sizes),
        ] {
            if let Some(value) = chosen.difference(known).next() {
                return Err(CoreError::UnknownSelectionValue(
                    label.to_string(),
                    value.clone(),
                ));
            }
        }
        Ok(())
    }
}
