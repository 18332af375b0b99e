use chrono::NaiveDate;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewPayment, PaymentKind, PaymentRecord, PaymentRow};

pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<PaymentRecord, sqlx::Error> {
    let row: PaymentRow = sqlx::query_as(
        r#"
            INSERT INTO payments (merchant_id, kind, amount, paid_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, merchant_id, kind, amount, paid_at;
        "#,
    )
    .bind(payment.merchant_id)
    .bind(payment.kind.to_string())
    .bind(payment.amount)
    .bind(payment.paid_at)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Payment #{} ({}) recorded for merchant #{}", row.id, row.kind, row.merchant_id);
    Ok(PaymentRecord::from(row))
}

/// Checks for a payment of the given kind whose calendar date falls within `[from, to]`.
///
/// Comparing on `date(paid_at)` gives the end bound end-of-day semantics.
pub async fn payment_exists(
    merchant_id: i64,
    kind: &PaymentKind,
    from: NaiveDate,
    to: NaiveDate,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let exists: i64 = sqlx::query_scalar(
        r#"
            SELECT EXISTS (
                SELECT 1 FROM payments
                WHERE merchant_id = $1 AND kind = $2 AND date(paid_at) BETWEEN date($3) AND date($4)
            )
        "#,
    )
    .bind(merchant_id)
    .bind(kind.to_string())
    .bind(from)
    .bind(to)
    .fetch_one(conn)
    .await?;
    Ok(exists != 0)
}

pub async fn fetch_payments_for_merchant(
    merchant_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<PaymentRecord>, sqlx::Error> {
    let rows: Vec<PaymentRow> = sqlx::query_as(
        "SELECT id, merchant_id, kind, amount, paid_at FROM payments WHERE merchant_id = $1 ORDER BY paid_at",
    )
    .bind(merchant_id)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(PaymentRecord::from).collect())
}
