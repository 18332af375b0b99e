use arrears_engine::{MonitoringApi, MonitoringReport, SqliteDatabase};
use log::*;
use tokio::task::JoinHandle;

use crate::{config::MonitorConfig, errors::MonitorServiceError};

const FALLBACK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Starts the monitoring worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// The first pass runs immediately, and then once every `config.interval`.
pub fn start_monitor_worker(db: SqliteDatabase, config: MonitorConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = config.interval.to_std().unwrap_or(FALLBACK_INTERVAL);
        let mut timer = tokio::time::interval(period);
        let api = MonitoringApi::new(db).with_max_concurrency(config.concurrency);
        info!("🕰️ Arrears monitor worker started. Passes run every {}s", period.as_secs());
        loop {
            timer.tick().await;
            let today = config.reference_date();
            info!("🕰️ Running arrears monitoring pass for {today}");
            match api.run_monitoring_pass(today).await {
                Ok(report) => log_report(&report),
                Err(e) => {
                    error!("🕰️ Error running arrears monitoring pass: {e}");
                },
            }
        }
    })
}

/// Runs a single monitoring pass and returns its report.
pub async fn run_once(db: SqliteDatabase, config: &MonitorConfig) -> Result<MonitoringReport, MonitorServiceError> {
    let api = MonitoringApi::new(db).with_max_concurrency(config.concurrency);
    let report = api.run_monitoring_pass(config.reference_date()).await?;
    log_report(&report);
    Ok(report)
}

fn log_report(report: &MonitoringReport) {
    info!("🕰️ {report}");
    if !report.skipped.is_empty() {
        debug!("🕰️ Contracts without a merchant: {}", id_list(&report.skipped));
    }
    for failure in &report.failures {
        warn!("🕰️ Contract #{} was not updated: {}", failure.contract_id, failure.reason);
    }
}

fn id_list(ids: &[i64]) -> String {
    ids.iter().map(|id| format!("#{id}")).collect::<Vec<String>>().join(", ")
}

#[cfg(test)]
mod test {
    use arrears_engine::{
        db_types::{Frequency, NewPayment, SeverityTier},
        sqlite_db::{contracts, merchants, payments},
        test_utils::prepare_env::prepare_test_db,
        MerchantStore,
    };
    use chrono::NaiveDate;

    use super::*;

    #[tokio::test]
    async fn run_once_uses_the_configured_reference_date() {
        let db = prepare_test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let m = merchants::insert_merchant("Grocer", &mut conn).await.unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        contracts::insert_contract(Some(m.id), Some(12), &Frequency::Monthly, Some(start), &mut conn).await.unwrap();
        let paid_at = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
        payments::insert_payment(NewPayment::recurring_due(m.id, 4_000, paid_at), &mut conn).await.unwrap();
        drop(conn);

        let config = MonitorConfig {
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            concurrency: 2,
            ..Default::default()
        };
        let report = run_once(db.clone(), &config).await.unwrap();
        assert_eq!(report.merchants_updated, 1);
        assert_eq!(report.reference_date, config.reference_date);
        // February is unpaid and 5 days late
        let stored = db.fetch_merchant(m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SeverityTier::Light);
        assert!(stored.in_arrears);
    }

    #[test]
    fn id_list_formatting() {
        assert_eq!(id_list(&[3, 14]), "#3, #14");
        assert_eq!(id_list(&[]), "");
    }
}
