//! Domain models

pub mod book;
pub mod borrower;
pub mod enums;
pub mod loan;
pub mod reservation;

pub use book::{Book, BookLoanCount, CreateBook, UpdateBook};
pub use borrower::{Borrower, CreateBorrower};
pub use enums::{BookStatus, ReservationStatus};
pub use loan::{CheckoutRequest, Loan};
pub use reservation::Reservation;
