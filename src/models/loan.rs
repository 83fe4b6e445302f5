//! Loan (ledger entry) model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Loan model from database.
///
/// A loan is created on checkout and mutated on return; it is never
/// deleted. At most one loan per book may have a null `return_date`
/// (enforced by a partial unique index).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub borrower_id: i32,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub overdue_days: i32,
    pub renewal_count: i16,
    pub fine_amount: Decimal,
    pub fine_paid: bool,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// A fine blocks further checkouts only when it is nonzero and unpaid;
    /// a zero fine is harmless regardless of the paid flag.
    pub fn has_blocking_fine(&self) -> bool {
        !self.fine_paid && self.fine_amount > Decimal::ZERO
    }
}

/// Checkout request
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub book_id: i32,
    pub borrower_id: i32,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(fine_amount: Decimal, fine_paid: bool) -> Loan {
        Loan {
            id: 1,
            book_id: 1,
            borrower_id: 1,
            checkout_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            return_date: Some(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()),
            overdue_days: 0,
            renewal_count: 0,
            fine_amount,
            fine_paid,
        }
    }

    #[test]
    fn test_only_nonzero_unpaid_fine_blocks() {
        assert!(loan(Decimal::new(1000, 2), false).has_blocking_fine());
        assert!(!loan(Decimal::new(1000, 2), true).has_blocking_fine());
        // A zero fine never blocks, whatever the paid flag says
        assert!(!loan(Decimal::ZERO, false).has_blocking_fine());
        assert!(!loan(Decimal::ZERO, true).has_blocking_fine());
    }
}
