//! # Arrears monitor
//! This crate hosts the service that runs the arrears monitoring engine on a schedule. It is responsible for:
//! Reading its configuration from the environment.
//! Opening the market database and bringing its schema up to date.
//! Running a monitoring pass once a day (or once, on demand), and logging the outcome.
//!
//! ## Configuration
//! The service is configured via environment variables. See [config](config/index.html) for more information.

pub mod cli;
pub mod config;
pub mod errors;
pub mod monitor_worker;
