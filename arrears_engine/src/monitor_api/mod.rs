//! # Arrears monitoring public API
//!
//! [`monitoring_api::MonitoringApi`] is the entry point for running monitoring passes. It is created by supplying a
//! backend that implements [`ArrearsDatabase`](crate::traits::ArrearsDatabase):
//!
//! ```rust,ignore
//! use arrears_engine::{MonitoringApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/market.db", 5).await?;
//! let api = MonitoringApi::new(db);
//! let report = api.run_monitoring_pass(chrono::Local::now().date_naive()).await?;
//! ```
//!
//! [`monitor_objects`] holds the values the API hands back: per-contract assessments and the per-pass report.
pub mod errors;
pub mod monitor_objects;
pub mod monitoring_api;
