//! Loans repository for database operations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{BookLoanCount, CheckoutRequest, Loan},
};

use super::conflict_on_unique;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Insert a new loan. A concurrent checkout of the same book trips
    /// the active-loan partial unique index and comes back as a conflict.
    pub async fn insert(&self, request: &CheckoutRequest) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, borrower_id, checkout_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.book_id)
        .bind(request.borrower_id)
        .bind(request.checkout_date)
        .bind(request.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Book is already on an active loan"))
    }

    /// Get the active loan for a book, if any
    pub async fn active_for_book(&self, book_id: i32) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE book_id = $1 AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }

    /// Active loans for a borrower, oldest checkout first
    pub async fn active_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE borrower_id = $1 AND return_date IS NULL
            ORDER BY checkout_date, id
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Record a return: stamps the return date, overdue days and fine
    pub async fn mark_returned(
        &self,
        id: i32,
        return_date: NaiveDate,
        overdue_days: i32,
        fine_amount: Decimal,
        fine_paid: bool,
    ) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET return_date = $2, overdue_days = $3, fine_amount = $4, fine_paid = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(return_date)
        .bind(overdue_days)
        .bind(fine_amount)
        .bind(fine_paid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Extend the due date and bump the renewal count
    pub async fn apply_renewal(&self, id: i32, new_due_date: NaiveDate) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET due_date = $2, renewal_count = renewal_count + 1
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_due_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Mark the fine paid without changing the amount
    pub async fn settle_fine(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "UPDATE loans SET fine_paid = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Whether the borrower has a nonzero unpaid fine on any past loan
    pub async fn has_blocking_fine(&self, borrower_id: i32) -> AppResult<bool> {
        let blocked: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM loans
                WHERE borrower_id = $1 AND fine_paid = FALSE AND fine_amount > 0
            )
            "#,
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(blocked)
    }

    /// Count loans checked out within the date range (inclusive)
    pub async fn count_checked_out_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE checkout_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count returns recorded within the date range (inclusive)
    pub async fn count_returned_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE return_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count returns in the range that came back late
    pub async fn count_late_returns_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE return_date BETWEEN $1 AND $2 AND overdue_days > 0",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Most-loaned books by checkout count in the range, ties broken by title
    pub async fn top_books_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<BookLoanCount>> {
        let rows = sqlx::query_as::<_, BookLoanCount>(
            r#"
            SELECT b.id as book_id, b.title, b.author, COUNT(*) as loan_count
            FROM loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.checkout_date BETWEEN $1 AND $2
            GROUP BY b.id, b.title, b.author
            ORDER BY loan_count DESC, b.title ASC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
