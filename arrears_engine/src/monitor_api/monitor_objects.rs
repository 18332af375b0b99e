use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db_types::{ArrearsResult, Frequency, SeverityTier};

/// The outcome of evaluating one contract on a given reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAssessment {
    pub contract_id: i64,
    pub merchant_id: i64,
    pub frequency: Frequency,
    pub reference_date: NaiveDate,
    pub arrears: ArrearsResult,
    pub tier: SeverityTier,
}

impl ContractAssessment {
    pub fn is_in_arrears(&self) -> bool {
        self.arrears.is_in_arrears()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFailure {
    pub contract_id: i64,
    pub reason: String,
}

/// Summary of a monitoring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub reference_date: Option<NaiveDate>,
    /// Number of active contracts fetched at the start of the pass
    pub contracts_seen: usize,
    pub merchants_updated: usize,
    /// Contracts without a merchant reference
    pub skipped: Vec<i64>,
    pub failures: Vec<ContractFailure>,
    pub tiers: BTreeMap<SeverityTier, usize>,
}

impl MonitoringReport {
    pub fn new(reference_date: NaiveDate, contracts_seen: usize) -> Self {
        Self { reference_date: Some(reference_date), contracts_seen, ..Default::default() }
    }

    pub fn record_success(&mut self, assessment: &ContractAssessment) {
        self.merchants_updated += 1;
        *self.tiers.entry(assessment.tier).or_default() += 1;
    }

    pub fn record_failure<S: Into<String>>(&mut self, contract_id: i64, reason: S) {
        self.failures.push(ContractFailure { contract_id, reason: reason.into() });
    }

    pub fn record_skipped(&mut self, contract_id: i64) {
        self.skipped.push(contract_id);
    }

    pub fn count_for(&self, tier: SeverityTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }

    pub fn in_arrears_count(&self) -> usize {
        self.merchants_updated - self.count_for(SeverityTier::UpToDate)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl Display for MonitoringReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tiers = SeverityTier::ALL
            .iter()
            .map(|t| format!("{t}: {}", self.count_for(*t)))
            .collect::<Vec<String>>()
            .join(", ");
        write!(
            f,
            "{} contracts, {} merchants updated, {} skipped, {} failed ({tiers})",
            self.contracts_seen,
            self.merchants_updated,
            self.skipped.len(),
            self.failures.len()
        )
    }
}
