//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Availability status of a catalog book.
///
/// Maintained by loan-ledger operations only; never set directly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Loaned,
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "available",
            BookStatus::Loaned => "loaned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a reservation.
///
/// `Active` and `Ready` are open states; the rest are terminal. Legal
/// transitions are encoded in [`crate::policy::holds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Ready,
    Cancelled,
    Expired,
    Fulfilled,
}

impl ReservationStatus {
    /// Open states still occupy the (book, borrower) uniqueness slot.
    pub fn is_open(self) -> bool {
        matches!(self, ReservationStatus::Active | ReservationStatus::Ready)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_open()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Active => "active",
            ReservationStatus::Ready => "ready",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Expired => "expired",
            ReservationStatus::Fulfilled => "fulfilled",
        };
        write!(f, "{}", label)
    }
}
