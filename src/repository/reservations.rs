//! Reservations repository for database operations
//!
//! Status changes here are plain writes; the legality of each transition
//! is checked upstream against the table in [`crate::policy::holds`].

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Reservation,
};

use super::conflict_on_unique;

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Append a new active reservation to the book's queue. A duplicate
    /// open reservation for the same (book, borrower) pair trips the
    /// partial unique index and comes back as a conflict.
    pub async fn insert(
        &self,
        book_id: i32,
        borrower_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (book_id, borrower_id, status, created_at)
            VALUES ($1, $2, 'active', $3)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(borrower_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Borrower already has an open reservation for this book"))
    }

    /// Oldest active reservation for a book (head of the queue)
    pub async fn oldest_active_for_book(&self, book_id: i32) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE book_id = $1 AND status = 'active'
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// The ready (held-for-pickup) reservation for a book, if any
    pub async fn ready_for_book(&self, book_id: i32) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE book_id = $1 AND status = 'ready' LIMIT 1",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// Ready reservations whose pickup deadline has passed
    pub async fn expired_ready(&self, now: DateTime<Utc>) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE status = 'ready' AND expires_at < $1
            ORDER BY expires_at, id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    /// Promote to ready, stamping the ready time and pickup deadline
    pub async fn mark_ready(
        &self,
        id: i32,
        ready_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'ready', ready_at = $2, expires_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ready_at)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Terminal transition: hold not picked up in time
    pub async fn mark_expired(&self, id: i32, now: DateTime<Utc>) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'expired', expired_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Terminal transition: borrower- or admin-initiated cancellation
    pub async fn mark_cancelled(&self, id: i32, now: DateTime<Utc>) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'cancelled', cancelled_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Terminal transition: hold consumed by the matching checkout
    pub async fn mark_fulfilled(&self, id: i32, now: DateTime<Utc>) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'fulfilled', fulfilled_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Whether any open (active or ready) reservation on the book belongs
    /// to a borrower other than the given one
    pub async fn open_for_book_by_other(&self, book_id: i32, borrower_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE book_id = $1 AND borrower_id != $2 AND status IN ('active', 'ready')
            )
            "#,
        )
        .bind(book_id)
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Whether any open reservation exists for the book
    pub async fn has_open_for_book(&self, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE book_id = $1 AND status IN ('active', 'ready')
            )
            "#,
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Count reservations created within the date range (inclusive)
    pub async fn count_created_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE created_at::date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
