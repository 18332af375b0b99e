use std::{collections::BTreeMap, fmt::Debug};

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use log::*;

use crate::{
    arrears::evaluate,
    db_types::Contract,
    monitor_api::{
        errors::MonitorError,
        monitor_objects::{ContractAssessment, MonitoringReport},
    },
    periods::generate_periods,
    severity::classify_arrears,
    traits::{ArrearsDatabase, StoreError},
};

/// `MonitoringApi` runs the arrears-monitoring pipeline over every active contract and writes the resulting status
/// back to each merchant.
///
/// The pipeline for a single contract is: generate elapsed periods → check the ledger for each → classify → save the
/// merchant. By default contracts are processed one at a time; use [`Self::with_max_concurrency`] to work on several
/// merchants at once.
pub struct MonitoringApi<B> {
    db: B,
    max_concurrency: usize,
}

impl<B> Debug for MonitoringApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MonitoringApi (max_concurrency: {})", self.max_concurrency)
    }
}

impl<B> MonitoringApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, max_concurrency: 1 }
    }

    /// Sets the number of merchants whose contracts may be evaluated at the same time. Values below 1 are treated as 1.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> MonitoringApi<B>
where B: ArrearsDatabase
{
    /// Runs a full monitoring pass, using `reference_date` as "today".
    ///
    /// Every active contract is assessed and its merchant's `status` and `in_arrears` fields are overwritten.
    /// * Contracts without a merchant are skipped.
    /// * Work is spread across merchants. A merchant's own contracts are always assessed in id order, so when a
    ///   merchant holds several contracts the one with the highest id determines the stored status, whatever the
    ///   concurrency.
    /// * A failure on one contract is logged and recorded in the report. The pass carries on with the next contract,
    ///   and the failed contract will be picked up again on the next pass.
    ///
    /// The only error returned is a failure to fetch the list of active contracts. Running the pass twice against the
    /// same data and reference date leaves every merchant in the same state.
    pub async fn run_monitoring_pass(&self, reference_date: NaiveDate) -> Result<MonitoringReport, StoreError> {
        let contracts = self.db.fetch_active_contracts().await?;
        info!("🔎️ Starting monitoring pass for {reference_date} over {} active contracts", contracts.len());
        let mut report = MonitoringReport::new(reference_date, contracts.len());
        let mut by_merchant: BTreeMap<i64, Vec<Contract>> = BTreeMap::new();
        for contract in contracts {
            match contract.merchant_id {
                Some(merchant_id) => by_merchant.entry(merchant_id).or_default().push(contract),
                None => {
                    trace!("🔎️ Contract #{} has no merchant. Skipping it.", contract.id);
                    report.record_skipped(contract.id);
                },
            }
        }
        let outcomes = stream::iter(by_merchant.into_values())
            .map(|group| self.assess_merchant_contracts(group, reference_date))
            .buffer_unordered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;
        for (contract_id, outcome) in outcomes.into_iter().flatten() {
            match outcome {
                Ok(assessment) => report.record_success(&assessment),
                Err(e) => {
                    error!("🔎️ Could not update arrears status for contract #{contract_id}. {e}");
                    report.record_failure(contract_id, e.to_string());
                },
            }
        }
        report.failures.sort_by_key(|f| f.contract_id);
        info!("🔎️ Monitoring pass for {reference_date} complete. {report}");
        Ok(report)
    }

    /// Assesses one merchant's contracts one after the other, in contract id order, so that the merchant's final state
    /// does not depend on how work is scheduled across merchants.
    async fn assess_merchant_contracts(
        &self,
        mut contracts: Vec<Contract>,
        reference_date: NaiveDate,
    ) -> Vec<(i64, Result<ContractAssessment, MonitorError>)> {
        contracts.sort_by_key(|c| c.id);
        let mut outcomes = Vec::with_capacity(contracts.len());
        for contract in &contracts {
            outcomes.push((contract.id, self.assess_and_save(contract, reference_date).await));
        }
        outcomes
    }

    /// Evaluates a single contract without writing anything.
    pub async fn evaluate_contract(
        &self,
        contract: &Contract,
        reference_date: NaiveDate,
    ) -> Result<ContractAssessment, MonitorError> {
        let merchant_id = contract.merchant_id.ok_or(MonitorError::NoMerchant(contract.id))?;
        let periods = generate_periods(contract.start_date, &contract.frequency, reference_date);
        let arrears =
            evaluate(&self.db, merchant_id, &periods).await.map_err(|e| MonitorError::store(contract.id, e))?;
        let tier = classify_arrears(&contract.frequency, &arrears, reference_date);
        trace!(
            "🔎️ Contract #{} (merchant #{merchant_id}, {}): {}/{} periods unpaid. Tier: {tier}",
            contract.id,
            contract.frequency,
            arrears.unpaid_count,
            arrears.periods_evaluated
        );
        Ok(ContractAssessment {
            contract_id: contract.id,
            merchant_id,
            frequency: contract.frequency.clone(),
            reference_date,
            arrears,
            tier,
        })
    }

    /// Evaluates a single contract and persists the result on its merchant.
    pub async fn assess_and_save(
        &self,
        contract: &Contract,
        reference_date: NaiveDate,
    ) -> Result<ContractAssessment, MonitorError> {
        let assessment = self.evaluate_contract(contract, reference_date).await?;
        let merchant_id = assessment.merchant_id;
        let mut merchant = self
            .db
            .fetch_merchant(merchant_id)
            .await
            .map_err(|e| MonitorError::store(contract.id, e))?
            .ok_or(MonitorError::MerchantNotFound { contract_id: contract.id, merchant_id })?;
        if merchant.status != assessment.tier {
            debug!("🔎️ Merchant #{merchant_id} moves from {} to {}", merchant.status, assessment.tier);
        }
        merchant.status = assessment.tier;
        merchant.in_arrears = assessment.is_in_arrears();
        self.db.save_merchant(&merchant).await.map_err(|e| MonitorError::store(contract.id, e))?;
        Ok(assessment)
    }
}
