//! Monitor configuration.
//!
//! | Variable                     | Default                   | Meaning                                              |
//! |------------------------------|---------------------------|------------------------------------------------------|
//! | `MKT_DATABASE_URL`           | `sqlite://data/market.db` | The market database                                  |
//! | `MKT_MONITOR_INTERVAL_SECS`  | `86400`                   | Time between monitoring passes                       |
//! | `MKT_MONITOR_CONCURRENCY`    | `4`                       | Contracts evaluated at the same time                 |
//! | `MKT_MONITOR_RUN_ONCE`       | `false`                   | Run a single pass and exit                           |
//! | `MKT_MONITOR_REFERENCE_DATE` | (today)                   | `YYYY-MM-DD`. Evaluate as of this date, not today    |
use std::env;

use chrono::{Duration, Local, NaiveDate};
use log::*;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/market.db";
const DEFAULT_MONITOR_INTERVAL: Duration = Duration::hours(24);
const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Clone, Debug)]
pub struct MonitorConfig {
    pub database_url: String,
    /// The time between the start of consecutive monitoring passes.
    pub interval: Duration,
    /// The number of contracts that are evaluated at the same time during a pass.
    pub concurrency: usize,
    /// If true, a single pass is run and the process exits.
    pub run_once: bool,
    /// When set, passes evaluate contracts as of this date rather than the current local date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            interval: DEFAULT_MONITOR_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
            run_once: false,
            reference_date: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Invalid values are logged and replaced with the
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let database_url = lookup("MKT_DATABASE_URL").unwrap_or_else(|| {
            warn!("🪛️ MKT_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let interval = lookup("MKT_MONITOR_INTERVAL_SECS")
            .and_then(|s| {
                s.parse::<i64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::seconds)
                    .or_else(|| {
                        warn!("🪛️ Invalid configuration value for MKT_MONITOR_INTERVAL_SECS: {s}. Using the default.");
                        None
                    })
            })
            .unwrap_or(DEFAULT_MONITOR_INTERVAL);
        let concurrency = lookup("MKT_MONITOR_CONCURRENCY")
            .and_then(|s| {
                s.parse::<usize>().ok().filter(|n| *n > 0).or_else(|| {
                    warn!("🪛️ Invalid configuration value for MKT_MONITOR_CONCURRENCY: {s}. Using the default.");
                    None
                })
            })
            .unwrap_or(DEFAULT_CONCURRENCY);
        let run_once = lookup("MKT_MONITOR_RUN_ONCE").map(|s| s == "1" || s == "true").unwrap_or(false);
        let reference_date = lookup("MKT_MONITOR_REFERENCE_DATE").and_then(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|e| warn!("🪛️ Ignoring invalid MKT_MONITOR_REFERENCE_DATE ({s}): {e}"))
                .ok()
        });
        if let Some(date) = reference_date {
            info!("🪛️ Monitoring passes will use {date} as the reference date.");
        }
        Self { database_url, interval, concurrency, run_once, reference_date }
    }

    /// The date that a pass starting now should treat as "today".
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn max_connections(&self) -> u32 {
        u32::try_from(self.concurrency).unwrap_or(u32::MAX).saturating_add(1)
    }
}
