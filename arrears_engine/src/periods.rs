//! Billing period generation.
//!
//! A contract owes dues for every billing period that has _fully_ elapsed since its start date. This module
//! reconstructs those periods from the start date and payment frequency. Calendar arithmetic is used throughout, so
//! monthly periods follow the real month lengths (including leap years).
use chrono::{Days, Months, NaiveDate};
use log::trace;

use crate::db_types::{Frequency, Period};

/// Returns the ordered list of billing periods that have fully elapsed on `today`.
///
/// * If there is no start date, or it lies after `today`, nothing is owed yet and the list is empty.
/// * Only periods whose `end` is on or before `today` are returned. A period still in progress is never included.
/// * Each period starts one frequency unit after the previous period's start.
pub fn generate_periods(start_date: Option<NaiveDate>, frequency: &Frequency, today: NaiveDate) -> Vec<Period> {
    let mut periods = Vec::new();
    let Some(mut start) = start_date else {
        return periods;
    };
    if start > today {
        trace!("📅️ Contract starts on {start}, after {today}. No periods are due.");
        return periods;
    }
    loop {
        let Some(end) = period_end(start, frequency) else {
            break;
        };
        if end > today {
            break;
        }
        periods.push(Period::new(start, end));
        match advance(start, frequency) {
            Some(next) if next <= today => start = next,
            _ => break,
        }
    }
    trace!("📅️ {} {frequency} periods have elapsed by {today}", periods.len());
    periods
}

/// The last day (inclusive) of the period starting on `start`.
fn period_end(start: NaiveDate, frequency: &Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => Some(start),
        Frequency::Weekly => start.checked_add_days(Days::new(6)),
        Frequency::Monthly | Frequency::Unrecognized(_) => {
            start.checked_add_months(Months::new(1)).and_then(|d| d.checked_sub_days(Days::new(1)))
        },
    }
}

/// Moves a period start forward by one frequency unit.
fn advance(start: NaiveDate, frequency: &Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => start.checked_add_days(Days::new(1)),
        Frequency::Weekly => start.checked_add_days(Days::new(7)),
        Frequency::Monthly | Frequency::Unrecognized(_) => start.checked_add_months(Months::new(1)),
    }
}
