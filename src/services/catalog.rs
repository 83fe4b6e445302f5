//! Book catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Borrower, CreateBook, CreateBorrower, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book; it enters the catalog available
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, title = %created.title, "book registered");
        Ok(created)
    }

    /// Get a book by ID
    pub async fn get_book(&self, book_id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(book_id).await
    }

    /// List all books, newest first
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Search books by title or author substring
    pub async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("search term is empty".to_string()));
        }
        self.repository.books.search(term).await
    }

    /// Update catalog fields of a book (availability status is owned by
    /// the loan ledger and cannot be set here)
    pub async fn update_book(&self, book_id: i32, changes: UpdateBook) -> AppResult<Book> {
        changes.validate()?;
        self.repository.books.update(book_id, &changes).await
    }

    /// Remove a book from the catalog. Denied while circulation still
    /// references it through an active loan or an open reservation.
    pub async fn delete_book(&self, book_id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(book_id).await?;

        if self.repository.loans.active_for_book(book_id).await?.is_some() {
            return Err(AppError::PolicyViolation(
                "book has an active loan".to_string(),
            ));
        }
        if self.repository.reservations.has_open_for_book(book_id).await? {
            return Err(AppError::PolicyViolation(
                "book has open reservations".to_string(),
            ));
        }

        self.repository.books.delete(book_id).await?;
        tracing::info!(book_id, "book removed from catalog");
        Ok(())
    }

    /// Register a borrower identity
    pub async fn register_borrower(&self, borrower: CreateBorrower) -> AppResult<Borrower> {
        borrower.validate()?;
        self.repository.borrowers.create(&borrower).await
    }

    /// Get a borrower by ID
    pub async fn get_borrower(&self, borrower_id: i32) -> AppResult<Borrower> {
        self.repository.borrowers.get_by_id(borrower_id).await
    }
}
