//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::enums::BookStatus;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub status: BookStatus,
}

/// Create book request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 50, message = "title must be 1-50 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "author must be 1-50 characters"))]
    pub author: String,
    pub isbn: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Update book request (partial; status is not user-settable)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 50, message = "title must be 1-50 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50, message = "author must be 1-50 characters"))]
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub complete: Option<bool>,
}

/// Loan count per book, for the most-loaned report
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookLoanCount {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub loan_count: i64,
}
