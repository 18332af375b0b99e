use arrears_engine::{
    db_types::{Contract, Frequency, Merchant, NewPayment},
    sqlite_db::{contracts, merchants, payments},
    SqliteDatabase,
};
pub use arrears_engine::test_utils::prepare_env::prepare_test_db as prepare_test_env;
use chrono::{NaiveDate, NaiveDateTime};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, min, 0).unwrap()
}

pub async fn add_merchant(db: &SqliteDatabase, name: &str) -> Merchant {
    let mut conn = db.pool().acquire().await.unwrap();
    merchants::insert_merchant(name, &mut conn).await.expect("Error inserting merchant")
}

pub async fn add_contract(
    db: &SqliteDatabase,
    merchant_id: Option<i64>,
    frequency: Frequency,
    start: Option<NaiveDate>,
) -> Contract {
    let mut conn = db.pool().acquire().await.unwrap();
    contracts::insert_contract(merchant_id, Some(1), &frequency, start, &mut conn).await.expect("Error inserting contract")
}

pub async fn add_payment(db: &SqliteDatabase, payment: NewPayment) {
    let mut conn = db.pool().acquire().await.unwrap();
    payments::insert_payment(payment, &mut conn).await.expect("Error inserting payment");
}
