//! Error types for the Biblox circulation core

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller can surface the reason and retry with corrected
    /// input. Conflicts are surfaced too, but retrying them verbatim will
    /// fail again until the competing loan or reservation is resolved.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::PolicyViolation(_) | AppError::NotFound(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(AppError::Validation("bad date".into()).is_recoverable());
        assert!(AppError::PolicyViolation("overdue".into()).is_recoverable());
        assert!(!AppError::Conflict("duplicate".into()).is_recoverable());
        assert!(!AppError::Internal("boom".into()).is_recoverable());
    }
}
