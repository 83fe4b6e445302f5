//! Overdue-days derivation
//!
//! Used by both fine assessment and renewal gating. The current date is
//! passed in explicitly so the derivation stays pure and testable.

use chrono::NaiveDate;

/// Days elapsed past the due date, never negative.
///
/// For a returned loan the return date is the reference point; for an
/// active loan it is `today`.
pub fn overdue_days(due_date: NaiveDate, return_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    let reference = return_date.unwrap_or(today);
    (reference - due_date).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_returned_on_time() {
        assert_eq!(overdue_days(d(2025, 3, 10), Some(d(2025, 3, 10)), d(2025, 4, 1)), 0);
    }

    #[test]
    fn test_returned_early() {
        assert_eq!(overdue_days(d(2025, 3, 10), Some(d(2025, 3, 8)), d(2025, 4, 1)), 0);
    }

    #[test]
    fn test_returned_five_days_late() {
        assert_eq!(overdue_days(d(2025, 3, 10), Some(d(2025, 3, 15)), d(2025, 3, 15)), 5);
    }

    #[test]
    fn test_active_not_yet_due() {
        assert_eq!(overdue_days(d(2025, 3, 10), None, d(2025, 3, 5)), 0);
    }

    #[test]
    fn test_active_past_due_counts_from_today() {
        assert_eq!(overdue_days(d(2025, 3, 10), None, d(2025, 3, 13)), 3);
    }
}
