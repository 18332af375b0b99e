use chrono::NaiveDate;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Contract, ContractRow, Frequency};

/// Fetches all active contracts, ordered by id.
pub async fn fetch_active_contracts(conn: &mut SqliteConnection) -> Result<Vec<Contract>, sqlx::Error> {
    let rows: Vec<ContractRow> = sqlx::query_as(
        "SELECT id, merchant_id, stall_id, frequency, start_date, active FROM contracts WHERE active ORDER BY id",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(Contract::from).collect())
}

pub async fn fetch_contract(id: i64, conn: &mut SqliteConnection) -> Result<Option<Contract>, sqlx::Error> {
    let row: Option<ContractRow> =
        sqlx::query_as("SELECT id, merchant_id, stall_id, frequency, start_date, active FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(row.map(Contract::from))
}

/// Inserts a new contract and returns it. The contract is created as active.
pub async fn insert_contract(
    merchant_id: Option<i64>,
    stall_id: Option<i64>,
    frequency: &Frequency,
    start_date: Option<NaiveDate>,
    conn: &mut SqliteConnection,
) -> Result<Contract, sqlx::Error> {
    let row: ContractRow = sqlx::query_as(
        r#"
            INSERT INTO contracts (merchant_id, stall_id, frequency, start_date, active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, merchant_id, stall_id, frequency, start_date, active;
        "#,
    )
    .bind(merchant_id)
    .bind(stall_id)
    .bind(frequency.to_string())
    .bind(start_date)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Contract #{} inserted for merchant {merchant_id:?}", row.id);
    Ok(Contract::from(row))
}

/// Marks a contract as active or inactive. Returns false if the contract does not exist.
pub async fn set_active(id: i64, active: bool, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE contracts SET active = $1 WHERE id = $2").bind(active).bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
