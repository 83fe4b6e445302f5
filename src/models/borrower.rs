//! Borrower identity reference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Borrower model from database.
///
/// The circulation core only needs an identity to attach loans and
/// reservations to; account management lives outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Borrower {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Create borrower request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBorrower {
    #[validate(length(min = 1, max = 150, message = "name must be 1-150 characters"))]
    pub name: String,
}
