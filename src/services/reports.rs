//! Circulation report service (read-only aggregates)

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::BookLoanCount,
    repository::Repository,
};

/// Circulation activity over an inclusive date range
#[derive(Debug, Clone, Serialize)]
pub struct CirculationReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub loans: i64,
    pub returns: i64,
    pub late_returns: i64,
    pub reservations: i64,
}

impl CirculationReport {
    /// True when the period saw no movement at all
    pub fn is_empty(&self) -> bool {
        self.loans == 0 && self.returns == 0 && self.late_returns == 0 && self.reservations == 0
    }
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count checkouts, returns, late returns and reservations created
    /// in the range. Non-mutating.
    pub async fn circulation_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<CirculationReport> {
        if end < start {
            return Err(AppError::Validation("end date precedes start date".to_string()));
        }

        let loans = self.repository.loans.count_checked_out_between(start, end).await?;
        let returns = self.repository.loans.count_returned_between(start, end).await?;
        let late_returns = self.repository.loans.count_late_returns_between(start, end).await?;
        let reservations = self.repository.reservations.count_created_between(start, end).await?;

        Ok(CirculationReport {
            start,
            end,
            loans,
            returns,
            late_returns,
            reservations,
        })
    }

    /// Most-loaned books by checkout count in the range
    pub async fn top_books(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<BookLoanCount>> {
        if end < start {
            return Err(AppError::Validation("end date precedes start date".to_string()));
        }
        if limit <= 0 {
            return Err(AppError::Validation("limit must be positive".to_string()));
        }
        self.repository.loans.top_books_between(start, end, limit).await
    }
}
