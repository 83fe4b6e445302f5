//! Loan ledger service: checkout, return, renewal, fine settlement

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::{BookStatus, CheckoutRequest, Loan},
    policy::{fines, overdue, renewal, RenewalDenial},
    repository::Repository,
    services::reservations::ReservationsService,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    reservations: ReservationsService,
    circulation: CirculationConfig,
}

impl CirculationService {
    pub fn new(
        repository: Repository,
        reservations: ReservationsService,
        circulation: CirculationConfig,
    ) -> Self {
        Self { repository, reservations, circulation }
    }

    /// Check a book out to a borrower.
    ///
    /// Rejected when the book is not available, when a ready hold belongs
    /// to a different borrower, when the borrower carries an unpaid fine,
    /// or when the dates are inconsistent. A successful checkout marks
    /// the book loaned and consumes the borrower's own ready hold.
    pub async fn checkout(&self, request: &CheckoutRequest, now: DateTime<Utc>) -> AppResult<Loan> {
        if request.due_date < request.checkout_date {
            return Err(AppError::Validation(
                "due date precedes checkout date".to_string(),
            ));
        }

        self.reservations.expire_stale(now).await?;

        self.repository.borrowers.get_by_id(request.borrower_id).await?;
        let book = self.repository.books.get_by_id(request.book_id).await?;

        if book.status != BookStatus::Available {
            return Err(AppError::PolicyViolation("book is not available".to_string()));
        }

        let hold = self.repository.reservations.ready_for_book(request.book_id).await?;
        if let Some(ref hold) = hold {
            if hold.borrower_id != request.borrower_id {
                return Err(AppError::PolicyViolation(
                    "reserved for pickup by another borrower".to_string(),
                ));
            }
        }

        if self.repository.loans.has_blocking_fine(request.borrower_id).await? {
            return Err(AppError::PolicyViolation(
                "checkout blocked: unpaid fine pending".to_string(),
            ));
        }

        let loan = self.repository.loans.insert(request).await?;
        self.repository.books.set_status(request.book_id, BookStatus::Loaned).await?;

        if let Some(hold) = hold {
            self.reservations.fulfill(&hold, now).await?;
        }

        tracing::info!(
            loan_id = loan.id,
            book_id = loan.book_id,
            borrower_id = loan.borrower_id,
            due_date = %loan.due_date,
            "book checked out"
        );
        Ok(loan)
    }

    /// Record a return: stamps the return date, assesses the fine, frees
    /// the book and hands it to the reservation queue.
    pub async fn return_loan(
        &self,
        loan_id: i32,
        return_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;

        if loan.is_returned() {
            return Err(AppError::PolicyViolation("loan already returned".to_string()));
        }
        if return_date < loan.checkout_date {
            return Err(AppError::Validation(
                "return date precedes checkout date".to_string(),
            ));
        }

        let days = overdue::overdue_days(loan.due_date, Some(return_date), return_date);
        let fine = fines::assess(days, self.circulation.daily_fine_rate, self.circulation.grace_days);

        let returned = self
            .repository
            .loans
            .mark_returned(loan.id, return_date, days as i32, fine.amount, fine.paid)
            .await?;
        self.repository.books.set_status(loan.book_id, BookStatus::Available).await?;

        if !fine.paid {
            tracing::info!(
                loan_id,
                overdue_days = days,
                fine = %fine.amount,
                "fine applied on late return"
            );
        }

        self.reservations.expire_stale(now).await?;
        self.reservations.promote_head(loan.book_id, now).await?;

        tracing::info!(loan_id, book_id = loan.book_id, "book returned");
        Ok(returned)
    }

    /// Whether the loan may be renewed right now, with the denial reason
    pub async fn can_renew(&self, loan_id: i32, now: DateTime<Utc>) -> AppResult<Result<(), RenewalDenial>> {
        self.reservations.expire_stale(now).await?;
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        self.renewal_verdict(&loan, now).await
    }

    /// Renew a loan: extends the due date and bumps the renewal count.
    /// Denied for returned or overdue loans, at the renewal limit, or
    /// when another borrower has an open reservation on the book.
    pub async fn renew_loan(&self, loan_id: i32, now: DateTime<Utc>) -> AppResult<Loan> {
        self.reservations.expire_stale(now).await?;
        let loan = self.repository.loans.get_by_id(loan_id).await?;

        if let Err(denial) = self.renewal_verdict(&loan, now).await? {
            return Err(AppError::PolicyViolation(denial.to_string()));
        }

        let new_due = loan.due_date + Duration::days(self.circulation.renewal_extension_days);
        let renewed = self.repository.loans.apply_renewal(loan.id, new_due).await?;
        tracing::info!(
            loan_id,
            new_due_date = %renewed.due_date,
            renewal_count = renewed.renewal_count,
            "loan renewed"
        );
        Ok(renewed)
    }

    async fn renewal_verdict(
        &self,
        loan: &Loan,
        now: DateTime<Utc>,
    ) -> AppResult<Result<(), RenewalDenial>> {
        if let Err(denial) = renewal::check(loan, now.date_naive(), self.circulation.max_renewals) {
            return Ok(Err(denial));
        }
        // Reservation precedence: someone else waiting beats a renewal.
        let contested = self
            .repository
            .reservations
            .open_for_book_by_other(loan.book_id, loan.borrower_id)
            .await?;
        if contested {
            return Ok(Err(RenewalDenial::ReservedByAnother));
        }
        Ok(Ok(()))
    }

    /// Mark a loan's fine paid without changing the amount
    pub async fn settle_fine(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.repository.loans.settle_fine(loan_id).await?;
        tracing::info!(loan_id, borrower_id = loan.borrower_id, "fine settled");
        Ok(loan)
    }

    /// Get a loan by ID
    pub async fn get_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(loan_id).await
    }

    /// Active loans for a borrower
    pub async fn borrower_loans(&self, borrower_id: i32) -> AppResult<Vec<Loan>> {
        self.repository.borrowers.get_by_id(borrower_id).await?;
        self.repository.loans.active_for_borrower(borrower_id).await
    }
}
