use chrono::NaiveDate;

use crate::{db_types::PaymentKind, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait PaymentLedger {
    /// Returns true if at least one payment of the given `kind` was made by the merchant between `from` and `to`.
    ///
    /// Both bounds are inclusive calendar days: a payment made at any time on the `to` date, up to the last instant of
    /// that day, is within the range.
    async fn payment_exists(
        &self,
        merchant_id: i64,
        kind: &PaymentKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool, StoreError>;
}
