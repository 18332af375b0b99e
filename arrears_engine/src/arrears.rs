//! Arrears evaluation: which of a contract's elapsed periods have been paid for?
use log::trace;

use crate::{
    db_types::{ArrearsResult, PaymentKind, Period},
    traits::{PaymentLedger, StoreError},
};

/// Checks every period against the ledger, in order, looking for a recurring-due payment from the merchant.
///
/// Payments of any other kind (e.g. the annual right) are ignored. The periods are expected in chronological order, so
/// the first unpaid period found is the oldest one.
///
/// This is a read-only query. Any ledger failure is returned to the caller as-is.
pub async fn evaluate<L: PaymentLedger>(
    ledger: &L,
    merchant_id: i64,
    periods: &[Period],
) -> Result<ArrearsResult, StoreError> {
    let mut result = ArrearsResult { periods_evaluated: periods.len(), ..Default::default() };
    for period in periods {
        let paid = ledger.payment_exists(merchant_id, &PaymentKind::RecurringDue, period.start, period.end).await?;
        if !paid {
            trace!("💸️ Merchant #{merchant_id} has no payment for period {period}");
            result.unpaid_count += 1;
            if result.first_unpaid_period.is_none() {
                result.first_unpaid_period = Some(*period);
            }
        }
    }
    Ok(result)
}
