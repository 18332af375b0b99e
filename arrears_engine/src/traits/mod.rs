//! # Collaborator contracts
//!
//! The monitoring engine does not own any of the data it works with. Contracts, payments and merchants all live in
//! external stores, and the engine talks to them through the narrow traits defined here.
//!
//! * [`ContractStore`] lists the contracts that are currently active.
//! * [`PaymentLedger`] answers whether a qualifying payment exists for a merchant over a date range.
//! * [`MerchantStore`] fetches merchants and persists their arrears status.
//! * [`ArrearsDatabase`] is the combination of all three, and is what the
//!   [`MonitoringApi`](crate::MonitoringApi) is generic over.
//!
//! [`SqliteDatabase`](crate::SqliteDatabase) implements all of them. In-memory fakes for tests live in
//! `test_utils`.
mod arrears_database;
mod contract_store;
mod merchant_store;
mod payment_ledger;

pub use arrears_database::{ArrearsDatabase, StoreError};
pub use contract_store::ContractStore;
pub use merchant_store::MerchantStore;
pub use payment_ledger::PaymentLedger;
