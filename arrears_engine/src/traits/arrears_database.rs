use thiserror::Error;

use crate::traits::{ContractStore, MerchantStore, PaymentLedger};

/// Everything the monitoring orchestrator needs from a backend.
///
/// This is blanket-implemented for any type that implements the three collaborator traits.
pub trait ArrearsDatabase: Clone + ContractStore + PaymentLedger + MerchantStore {}

impl<T> ArrearsDatabase for T where T: Clone + ContractStore + PaymentLedger + MerchantStore {}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
    #[error("The requested merchant id {0} does not exist")]
    MerchantNotFound(i64),
    #[error("The backend is unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}
