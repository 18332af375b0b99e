use thiserror::Error;

use crate::traits::StoreError;

/// A failure while assessing a single contract. These never abort a monitoring pass.
#[derive(Debug, Clone, Error)]
pub enum MonitorError {
    #[error("Contract #{0} has no merchant attached")]
    NoMerchant(i64),
    #[error("Merchant #{merchant_id} referenced by contract #{contract_id} does not exist")]
    MerchantNotFound { contract_id: i64, merchant_id: i64 },
    #[error("Store error while processing contract #{contract_id}: {source}")]
    StoreError { contract_id: i64, source: StoreError },
}

impl MonitorError {
    pub fn store(contract_id: i64, source: StoreError) -> Self {
        Self::StoreError { contract_id, source }
    }
}
