use arrears_engine::{
    db_types::{Frequency, Merchant, NewPayment, SeverityTier},
    MerchantStore,
    MonitoringApi,
    SqliteDatabase,
};
use log::*;

use crate::support::prepare_env::{add_contract, add_merchant, add_payment, at, date, prepare_test_env};

mod support;

#[tokio::test]
async fn monitoring_pass_classifies_every_merchant() {
    let db = prepare_test_env().await;
    // Pays every month
    let punctual = add_merchant(&db, "Punctual").await;
    add_contract(&db, Some(punctual.id), Frequency::Monthly, Some(date(2024, 1, 1))).await;
    for (m, d) in [(1, 3), (2, 29), (3, 31)] {
        add_payment(&db, NewPayment::recurring_due(punctual.id, 5_000, at(2024, m, d, 12, 0))).await;
    }
    // Missed March only
    let late = add_merchant(&db, "Late").await;
    add_contract(&db, Some(late.id), Frequency::Monthly, Some(date(2024, 1, 1))).await;
    for m in [1, 2] {
        add_payment(&db, NewPayment::recurring_due(late.id, 5_000, at(2024, m, 5, 12, 0))).await;
    }
    // Weekly, three unpaid weeks
    let weekly = add_merchant(&db, "Weekly").await;
    add_contract(&db, Some(weekly.id), Frequency::Weekly, Some(date(2024, 3, 25))).await;
    // Daily merchant who has never paid
    let daily = add_merchant(&db, "Daily").await;
    add_contract(&db, Some(daily.id), Frequency::Daily, Some(date(2024, 4, 1))).await;
    // Not started yet
    let future = add_merchant(&db, "Future").await;
    add_contract(&db, Some(future.id), Frequency::Monthly, Some(date(2099, 1, 1))).await;
    // No merchant at all
    add_contract(&db, None, Frequency::Monthly, Some(date(2024, 1, 1))).await;

    let api = MonitoringApi::new(db.clone());
    let today = date(2024, 4, 15);
    let report = api.run_monitoring_pass(today).await.expect("Monitoring pass failed");
    info!("🚀️ {report}");
    assert_eq!(report.contracts_seen, 6);
    assert_eq!(report.merchants_updated, 5);
    assert_eq!(report.skipped.len(), 1);
    assert!(!report.has_failures());

    let status = |id| {
        let db = db.clone();
        async move { db.fetch_merchant(id).await.unwrap().unwrap() }
    };
    let p = status(punctual.id).await;
    assert_eq!((p.status, p.in_arrears), (SeverityTier::UpToDate, false));
    let l = status(late.id).await;
    assert_eq!((l.status, l.in_arrears), (SeverityTier::Light, true));
    // Weeks ending Mar 31, Apr 7 and Apr 14 are unpaid. 15 days late but only 3 periods, so Critical
    let w = status(weekly.id).await;
    assert_eq!((w.status, w.in_arrears), (SeverityTier::Critical, true));
    let d = status(daily.id).await;
    assert_eq!((d.status, d.in_arrears), (SeverityTier::Extended, true));
    let f = status(future.id).await;
    assert_eq!((f.status, f.in_arrears), (SeverityTier::UpToDate, false));
    assert_eq!(report.count_for(SeverityTier::UpToDate), 2);
    assert_eq!(report.in_arrears_count(), 3);
}

#[tokio::test]
async fn monitoring_pass_is_idempotent() {
    let db = prepare_test_env().await;
    let mut ids = Vec::new();
    for (i, freq) in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly].into_iter().enumerate() {
        let m = add_merchant(&db, &format!("Merchant {i}")).await;
        add_contract(&db, Some(m.id), freq, Some(date(2024, 1, 8))).await;
        add_payment(&db, NewPayment::recurring_due(m.id, 1_000, at(2024, 1, 8, 8, 0))).await;
        ids.push(m.id);
    }
    let api = MonitoringApi::new(db.clone()).with_max_concurrency(3);
    let today = date(2024, 3, 1);
    let first_report = api.run_monitoring_pass(today).await.unwrap();
    let mut first = Vec::new();
    for id in &ids {
        first.push(db.fetch_merchant(*id).await.unwrap().unwrap());
    }
    let second_report = api.run_monitoring_pass(today).await.unwrap();
    let mut second = Vec::new();
    for id in &ids {
        second.push(db.fetch_merchant(*id).await.unwrap().unwrap());
    }
    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[tokio::test]
async fn paying_off_arrears_restores_up_to_date() {
    let db = prepare_test_env().await;
    let m = add_merchant(&db, "Eve").await;
    add_contract(&db, Some(m.id), Frequency::Weekly, Some(date(2024, 3, 4))).await;
    let api = MonitoringApi::new(db.clone());
    let today = date(2024, 3, 12);
    api.run_monitoring_pass(today).await.unwrap();
    assert_eq!(db.fetch_merchant(m.id).await.unwrap().unwrap().status, SeverityTier::Light);

    add_payment(&db, NewPayment::recurring_due(m.id, 700, at(2024, 3, 10, 17, 45))).await;
    api.run_monitoring_pass(today).await.unwrap();
    let stored = db.fetch_merchant(m.id).await.unwrap().unwrap();
    assert_eq!(stored.status, SeverityTier::UpToDate);
    assert!(!stored.in_arrears);
}

/// Three merchants, one of whom holds a paid-up monthly contract and a weekly contract with two uncovered weeks.
async fn shared_stall_market() -> (SqliteDatabase, Vec<i64>) {
    let db = prepare_test_env().await;
    let shared = add_merchant(&db, "Two stalls").await;
    add_contract(&db, Some(shared.id), Frequency::Monthly, Some(date(2024, 1, 1))).await;
    add_contract(&db, Some(shared.id), Frequency::Weekly, Some(date(2024, 3, 25))).await;
    for (m, d) in [(1, 10), (2, 10), (3, 31)] {
        add_payment(&db, NewPayment::recurring_due(shared.id, 5_000, at(2024, m, d, 9, 0))).await;
    }
    let daily = add_merchant(&db, "Baker").await;
    add_contract(&db, Some(daily.id), Frequency::Daily, Some(date(2024, 4, 10))).await;
    let monthly = add_merchant(&db, "Florist").await;
    add_contract(&db, Some(monthly.id), Frequency::Monthly, Some(date(2024, 2, 1))).await;
    add_payment(&db, NewPayment::recurring_due(monthly.id, 5_000, at(2024, 2, 28, 9, 0))).await;
    (db, vec![shared.id, daily.id, monthly.id])
}

async fn merchant_states(db: &SqliteDatabase, ids: &[i64]) -> Vec<Merchant> {
    let mut merchants = Vec::new();
    for id in ids {
        merchants.push(db.fetch_merchant(*id).await.unwrap().unwrap());
    }
    merchants
}

#[tokio::test]
async fn concurrent_pass_matches_sequential_pass() {
    let today = date(2024, 4, 15);
    let (sequential_db, ids) = shared_stall_market().await;
    MonitoringApi::new(sequential_db.clone()).run_monitoring_pass(today).await.unwrap();
    let sequential = merchant_states(&sequential_db, &ids).await;

    let (concurrent_db, concurrent_ids) = shared_stall_market().await;
    assert_eq!(ids, concurrent_ids);
    let api = MonitoringApi::new(concurrent_db.clone()).with_max_concurrency(4);
    for _ in 0..3 {
        api.run_monitoring_pass(today).await.unwrap();
        assert_eq!(merchant_states(&concurrent_db, &ids).await, sequential);
    }
    // The weekly contract was created last, so its Significant rating is the one kept for the shared merchant
    assert_eq!(sequential[0].status, SeverityTier::Significant);
    assert_eq!(sequential[1].status, SeverityTier::Critical);
    // March is unpaid, 15 days late
    assert_eq!(sequential[2].status, SeverityTier::Light);
}
