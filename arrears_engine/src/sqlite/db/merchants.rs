use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{Merchant, SeverityTier};

pub async fn insert_merchant(name: &str, conn: &mut SqliteConnection) -> Result<Merchant, sqlx::Error> {
    let merchant = sqlx::query_as(
        "INSERT INTO merchants (name, status, in_arrears) VALUES ($1, $2, FALSE) RETURNING id, name, status, in_arrears",
    )
    .bind(name)
    .bind(SeverityTier::UpToDate)
    .fetch_one(conn)
    .await?;
    Ok(merchant)
}

pub async fn fetch_merchant(id: i64, conn: &mut SqliteConnection) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant = sqlx::query_as("SELECT id, name, status, in_arrears FROM merchants WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(merchant)
}

/// Overwrites the arrears status of the merchant. Returns false if no merchant with that id exists.
pub async fn update_arrears_status(
    id: i64,
    status: SeverityTier,
    in_arrears: bool,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE merchants SET status = $1, in_arrears = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $3",
    )
    .bind(status)
    .bind(in_arrears)
    .bind(id)
    .execute(conn)
    .await?;
    trace!("📝️ Merchant #{id} status set to {status}");
    Ok(result.rows_affected() > 0)
}
