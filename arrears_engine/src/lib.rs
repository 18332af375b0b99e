//! Market Arrears Engine
//!
//! Merchants in a municipal market hold contracts for their stalls and pay recurring dues daily, weekly or monthly.
//! This library works out, for each active contract, which billing periods have fully elapsed, which of those have
//! been paid for, and how delinquent the merchant is as a result.
//!
//! The library is divided into these sections:
//! 1. The monitoring pipeline: [`mod@periods`] generates elapsed billing periods, [`mod@arrears`] checks them against
//!    the payment ledger, and [`mod@severity`] maps the outcome to a [`SeverityTier`](db_types::SeverityTier).
//! 2. The public API ([`MonitoringApi`]), which runs the pipeline over every active contract and writes the result
//!    back to each merchant.
//! 3. Backend contracts ([`mod@traits`]). The engine never reaches into storage directly; a backend implements
//!    [`ContractStore`], [`PaymentLedger`] and [`MerchantStore`]. SQLite is the bundled backend.
pub mod arrears;
pub mod db_types;
pub mod periods;
pub mod severity;
pub mod traits;

mod monitor_api;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::{db as sqlite_db, SqliteDatabase};
pub use monitor_api::{
    errors::MonitorError,
    monitor_objects::{self, ContractAssessment, ContractFailure, MonitoringReport},
    monitoring_api::MonitoringApi,
};
pub use traits::{ArrearsDatabase, ContractStore, MerchantStore, PaymentLedger, StoreError};
