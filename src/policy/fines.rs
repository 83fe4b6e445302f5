//! Fine assessment
//!
//! Pure computation from overdue days to a monetary fine. A fine at or
//! under the grace period is zero and recorded as already paid, so it
//! never blocks future checkouts.

use rust_decimal::Decimal;

/// Outcome of assessing a loan's fine on return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineAssessment {
    pub amount: Decimal,
    pub paid: bool,
}

/// Assess the fine for a loan with the given overdue days.
///
/// Days past the grace period are charged at `daily_rate` each and the
/// fine starts out unpaid; otherwise the fine is zero and marked paid.
/// Recomputing with the same inputs always yields the same result.
pub fn assess(overdue_days: i64, daily_rate: Decimal, grace_days: i64) -> FineAssessment {
    if overdue_days > grace_days {
        FineAssessment {
            amount: Decimal::from(overdue_days - grace_days) * daily_rate,
            paid: false,
        }
    } else {
        FineAssessment {
            amount: Decimal::ZERO,
            paid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> Decimal {
        Decimal::new(200, 2) // 2.00
    }

    #[test]
    fn test_on_time_is_zero_and_paid() {
        let fine = assess(0, rate(), 0);
        assert_eq!(fine.amount, Decimal::ZERO);
        assert!(fine.paid);
    }

    #[test]
    fn test_five_days_late_at_two_per_day() {
        let fine = assess(5, rate(), 0);
        assert_eq!(fine.amount, Decimal::new(1000, 2)); // 10.00
        assert!(!fine.paid);
    }

    #[test]
    fn test_grace_days_exempted() {
        let fine = assess(3, rate(), 3);
        assert_eq!(fine.amount, Decimal::ZERO);
        assert!(fine.paid);

        let fine = assess(4, rate(), 3);
        assert_eq!(fine.amount, rate());
        assert!(!fine.paid);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(assess(7, rate(), 1), assess(7, rate(), 1));
    }

    #[test]
    fn test_monotonic_in_overdue_days() {
        let mut previous = Decimal::ZERO;
        for days in 0..30 {
            let fine = assess(days, rate(), 2);
            assert!(fine.amount >= previous);
            previous = fine.amount;
        }
    }
}
