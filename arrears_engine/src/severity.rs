//! Delinquency severity classification.
//!
//! Each frequency has its own threshold table. The tiers are checked in order (Light, Significant, Critical) and the
//! first matching condition wins; anything left over is `Extended`.
//!
//! | Frequency    | Light                   | Significant            | Critical               | Extended  |
//! |--------------|-------------------------|------------------------|------------------------|-----------|
//! | Monthly      | count=1 AND daysLate≤30 | count≤2 OR daysLate≤60 | count≤3 OR daysLate≤90 | otherwise |
//! | Weekly       | count=1 AND daysLate≤7  | count≤2 OR daysLate≤14 | count≤3 OR daysLate≤21 | otherwise |
//! | Daily        | count=1 OR daysLate≤1   | count≤3 OR daysLate≤3  | count≤7 OR daysLate≤7  | otherwise |
//! | Unrecognized | daysLate≤5              | daysLate≤15            | daysLate≤30            | otherwise |
//!
//! Note that `Light` is an AND condition for monthly and weekly contracts, while every other cell is an OR. A single
//! unpaid month that is 45 days late is therefore `Significant`, because `count≤2` holds.
use chrono::NaiveDate;

use crate::db_types::{ArrearsResult, Frequency, SeverityTier};

/// Classifies a merchant given the oldest unpaid period's end date and the number of unpaid periods.
pub fn classify(
    frequency: &Frequency,
    first_unpaid_end: Option<NaiveDate>,
    unpaid_count: usize,
    today: NaiveDate,
) -> SeverityTier {
    if unpaid_count == 0 {
        return SeverityTier::UpToDate;
    }
    let late = first_unpaid_end.map(|end| days_late(end, today)).unwrap_or(0);
    let count = unpaid_count;
    use SeverityTier::*;
    match frequency {
        Frequency::Monthly => match (count, late) {
            (1, d) if d <= 30 => Light,
            (c, d) if c <= 2 || d <= 60 => Significant,
            (c, d) if c <= 3 || d <= 90 => Critical,
            _ => Extended,
        },
        Frequency::Weekly => match (count, late) {
            (1, d) if d <= 7 => Light,
            (c, d) if c <= 2 || d <= 14 => Significant,
            (c, d) if c <= 3 || d <= 21 => Critical,
            _ => Extended,
        },
        Frequency::Daily => match (count, late) {
            (c, d) if c == 1 || d <= 1 => Light,
            (c, d) if c <= 3 || d <= 3 => Significant,
            (c, d) if c <= 7 || d <= 7 => Critical,
            _ => Extended,
        },
        Frequency::Unrecognized(_) => match late {
            d if d <= 5 => Light,
            d if d <= 15 => Significant,
            d if d <= 30 => Critical,
            _ => Extended,
        },
    }
}

/// Convenience wrapper around [`classify`] for an evaluated contract.
pub fn classify_arrears(frequency: &Frequency, arrears: &ArrearsResult, today: NaiveDate) -> SeverityTier {
    let end = arrears.first_unpaid_period.map(|p| p.end);
    classify(frequency, end, arrears.unpaid_count, today)
}

/// Whole days between the end of a period and `today`. Never negative.
pub fn days_late(period_end: NaiveDate, today: NaiveDate) -> i64 {
    (today - period_end).num_days().max(0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db_types::{Period, SeverityTier::*};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Classify with a given number of days late, measured back from a fixed reference date.
    fn tier(frequency: Frequency, count: usize, late: u64) -> SeverityTier {
        let today = date(2024, 6, 30);
        let end = today - chrono::Days::new(late);
        classify(&frequency, Some(end), count, today)
    }

    #[test]
    fn nothing_unpaid_is_up_to_date() {
        for freq in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly, Frequency::Unrecognized("?".into())] {
            assert_eq!(classify(&freq, None, 0, date(2024, 1, 1)), UpToDate);
            assert_eq!(tier(freq, 0, 400), UpToDate);
        }
    }

    #[test]
    fn recent_single_monthly_gap_is_light() {
        let today = date(2024, 3, 10);
        assert_eq!(days_late(date(2024, 2, 29), today), 10);
        assert_eq!(classify(&Frequency::Monthly, Some(date(2024, 2, 29)), 1, today), Light);
    }

    #[test]
    fn aged_single_monthly_gap_is_significant() {
        // count≤2 satisfies Significant regardless of how late the payment is
        let today = date(2024, 6, 1);
        assert_eq!(days_late(date(2024, 2, 29), today), 93);
        assert_eq!(classify(&Frequency::Monthly, Some(date(2024, 2, 29)), 1, today), Significant);
    }

    #[test]
    fn monthly_table() {
        assert_eq!(tier(Frequency::Monthly, 1, 0), Light);
        assert_eq!(tier(Frequency::Monthly, 1, 30), Light);
        assert_eq!(tier(Frequency::Monthly, 1, 31), Significant);
        assert_eq!(tier(Frequency::Monthly, 2, 5), Significant);
        assert_eq!(tier(Frequency::Monthly, 3, 60), Significant);
        assert_eq!(tier(Frequency::Monthly, 3, 61), Critical);
        assert_eq!(tier(Frequency::Monthly, 4, 90), Critical);
        assert_eq!(tier(Frequency::Monthly, 4, 91), Extended);
        assert_eq!(tier(Frequency::Monthly, 4, 93), Extended);
    }

    #[test]
    fn weekly_or_rule_stops_at_first_match() {
        // 3 > 2, but daysLate≤14 holds, so Significant wins before Critical is checked
        assert_eq!(tier(Frequency::Weekly, 3, 5), Significant);
    }

    #[test]
    fn weekly_table() {
        assert_eq!(tier(Frequency::Weekly, 1, 7), Light);
        assert_eq!(tier(Frequency::Weekly, 1, 8), Significant);
        assert_eq!(tier(Frequency::Weekly, 2, 30), Significant);
        assert_eq!(tier(Frequency::Weekly, 3, 15), Critical);
        assert_eq!(tier(Frequency::Weekly, 4, 21), Critical);
        assert_eq!(tier(Frequency::Weekly, 4, 22), Extended);
    }

    #[test]
    fn daily_table() {
        assert_eq!(tier(Frequency::Daily, 1, 40), Light);
        assert_eq!(tier(Frequency::Daily, 5, 1), Light);
        assert_eq!(tier(Frequency::Daily, 3, 2), Significant);
        assert_eq!(tier(Frequency::Daily, 4, 3), Significant);
        assert_eq!(tier(Frequency::Daily, 7, 6), Critical);
        assert_eq!(tier(Frequency::Daily, 10, 7), Critical);
        assert_eq!(tier(Frequency::Daily, 8, 8), Extended);
    }

    #[test]
    fn unrecognized_frequency_uses_days_late_only() {
        let freq = || Frequency::Unrecognized("BIANNUAL".into());
        assert_eq!(tier(freq(), 50, 5), Light);
        assert_eq!(tier(freq(), 1, 6), Significant);
        assert_eq!(tier(freq(), 1, 15), Significant);
        assert_eq!(tier(freq(), 1, 30), Critical);
        assert_eq!(tier(freq(), 1, 31), Extended);
    }

    #[test]
    fn classify_from_arrears_result() {
        let arrears = ArrearsResult {
            first_unpaid_period: Some(Period::new(date(2024, 3, 4), date(2024, 3, 10))),
            unpaid_count: 1,
            periods_evaluated: 4,
        };
        assert_eq!(classify_arrears(&Frequency::Weekly, &arrears, date(2024, 3, 15)), Light);
        assert_eq!(classify_arrears(&Frequency::Weekly, &ArrearsResult::default(), date(2024, 3, 15)), UpToDate);
    }
}
