//! Renewal eligibility rules

use chrono::NaiveDate;

use crate::models::Loan;

use super::overdue::overdue_days;

/// Reason a renewal request is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalDenial {
    AlreadyReturned,
    Overdue,
    LimitReached,
    /// Another borrower holds an active or ready reservation on the book;
    /// reservations take precedence over renewal.
    ReservedByAnother,
}

impl std::fmt::Display for RenewalDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RenewalDenial::AlreadyReturned => "already returned",
            RenewalDenial::Overdue => "overdue, cannot renew",
            RenewalDenial::LimitReached => "renewal limit reached",
            RenewalDenial::ReservedByAnother => "reserved by another borrower",
        };
        write!(f, "{}", reason)
    }
}

/// Check whether a loan may be renewed as of `today`.
///
/// Reservation precedence (`ReservedByAnother`) needs a queue lookup and
/// is checked by the circulation service on top of this.
pub fn check(loan: &Loan, today: NaiveDate, max_renewals: i16) -> Result<(), RenewalDenial> {
    if loan.is_returned() {
        return Err(RenewalDenial::AlreadyReturned);
    }
    if overdue_days(loan.due_date, None, today) > 0 {
        return Err(RenewalDenial::Overdue);
    }
    if loan.renewal_count >= max_renewals {
        return Err(RenewalDenial::LimitReached);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn loan(due: NaiveDate, returned: Option<NaiveDate>, renewals: i16) -> Loan {
        Loan {
            id: 1,
            book_id: 1,
            borrower_id: 1,
            checkout_date: d(2025, 3, 1),
            due_date: due,
            return_date: returned,
            overdue_days: 0,
            renewal_count: renewals,
            fine_amount: Decimal::ZERO,
            fine_paid: true,
        }
    }

    #[test]
    fn test_allows_active_on_time_loan() {
        let l = loan(d(2025, 3, 8), None, 0);
        assert_eq!(check(&l, d(2025, 3, 5), 1), Ok(()));
    }

    #[test]
    fn test_denies_returned_loan() {
        let l = loan(d(2025, 3, 8), Some(d(2025, 3, 7)), 0);
        assert_eq!(check(&l, d(2025, 3, 5), 1), Err(RenewalDenial::AlreadyReturned));
    }

    #[test]
    fn test_denies_overdue_loan() {
        let l = loan(d(2025, 3, 8), None, 0);
        assert_eq!(check(&l, d(2025, 3, 9), 1), Err(RenewalDenial::Overdue));
    }

    #[test]
    fn test_denies_at_renewal_limit() {
        let l = loan(d(2025, 3, 8), None, 1);
        assert_eq!(check(&l, d(2025, 3, 5), 1), Err(RenewalDenial::LimitReached));
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let l = loan(d(2025, 3, 8), None, 0);
        assert_eq!(check(&l, d(2025, 3, 8), 1), Ok(()));
    }
}
