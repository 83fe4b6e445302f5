//! Reservation (hold queue entry) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::enums::ReservationStatus;

/// Reservation model from database.
///
/// Queue position within a book is given by `created_at` (FIFO). At most
/// one active-or-ready reservation may exist per (book, borrower) pair
/// (enforced by a partial unique index).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: i32,
    pub book_id: i32,
    pub borrower_id: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub ready_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub fulfilled_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
}
