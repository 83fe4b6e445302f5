//! Reservation queue service
//!
//! Drives the hold state machine: FIFO enqueue, head promotion with a
//! pickup deadline, lazy expiry with cascading promotion, cancellation
//! and fulfillment. There is no background scheduler; `expire_stale` is
//! run at the start of every queue-affecting operation.

use chrono::{DateTime, Utc};

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::{BookStatus, Reservation, ReservationStatus},
    policy::holds,
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    circulation: CirculationConfig,
}

impl ReservationsService {
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        Self { repository, circulation }
    }

    /// Place a reservation at the tail of the book's queue.
    ///
    /// Reservations only apply to books that are currently out on loan;
    /// an available book can simply be checked out.
    pub async fn enqueue(
        &self,
        book_id: i32,
        borrower_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        self.expire_stale(now).await?;

        self.repository.borrowers.get_by_id(borrower_id).await?;
        let book = self.repository.books.get_by_id(book_id).await?;

        if book.status == BookStatus::Available {
            return Err(AppError::PolicyViolation(
                "book available, reservation not needed".to_string(),
            ));
        }

        let reservation = self.repository.reservations.insert(book_id, borrower_id, now).await?;
        tracing::info!(
            reservation_id = reservation.id,
            book_id,
            borrower_id,
            "reservation enqueued"
        );
        Ok(reservation)
    }

    /// Promote the oldest active reservation for the book to ready,
    /// stamping the ready time and the pickup deadline. Returns the
    /// promoted reservation, or `None` if the queue has no active entry.
    pub async fn promote_head(
        &self,
        book_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Reservation>> {
        let head = match self.repository.reservations.oldest_active_for_book(book_id).await? {
            Some(head) => head,
            None => return Ok(None),
        };

        holds::validate_transition(head.status, ReservationStatus::Ready)?;
        let deadline = holds::hold_deadline(now, self.circulation.hold_window_days);
        let promoted = self.repository.reservations.mark_ready(head.id, now, deadline).await?;
        tracing::info!(
            reservation_id = promoted.id,
            book_id,
            expires_at = %deadline,
            "reservation promoted to ready"
        );
        Ok(Some(promoted))
    }

    /// Expire every ready reservation whose pickup deadline has passed,
    /// promoting the next in line for each affected book. Idempotent:
    /// a second pass finds nothing left to expire.
    pub async fn expire_stale(&self, now: DateTime<Utc>) -> AppResult<()> {
        for stale in self.repository.reservations.expired_ready(now).await? {
            holds::validate_transition(stale.status, ReservationStatus::Expired)?;
            self.repository.reservations.mark_expired(stale.id, now).await?;
            tracing::info!(
                reservation_id = stale.id,
                book_id = stale.book_id,
                "hold expired, promoting next in line"
            );
            self.promote_head(stale.book_id, now).await?;
        }
        Ok(())
    }

    /// Cancel an open reservation. Cancelling a ready hold frees the
    /// book for the next borrower in line.
    pub async fn cancel(&self, reservation_id: i32, now: DateTime<Utc>) -> AppResult<Reservation> {
        self.expire_stale(now).await?;

        let reservation = self.repository.reservations.get_by_id(reservation_id).await?;
        holds::validate_transition(reservation.status, ReservationStatus::Cancelled)?;

        let was_ready = reservation.status == ReservationStatus::Ready;
        let cancelled = self.repository.reservations.mark_cancelled(reservation.id, now).await?;
        tracing::info!(reservation_id, book_id = cancelled.book_id, "reservation cancelled");

        if was_ready {
            self.promote_head(cancelled.book_id, now).await?;
        }
        Ok(cancelled)
    }

    /// Consume a ready hold with the matching checkout. Called by the
    /// loan ledger when the holding borrower checks the book out.
    pub async fn fulfill(&self, reservation: &Reservation, now: DateTime<Utc>) -> AppResult<Reservation> {
        holds::validate_transition(reservation.status, ReservationStatus::Fulfilled)?;
        let fulfilled = self.repository.reservations.mark_fulfilled(reservation.id, now).await?;
        tracing::info!(
            reservation_id = fulfilled.id,
            book_id = fulfilled.book_id,
            "hold fulfilled by checkout"
        );
        Ok(fulfilled)
    }

    /// Get a reservation by ID
    pub async fn get(&self, reservation_id: i32) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(reservation_id).await
    }
}
