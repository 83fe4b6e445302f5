//! Biblox circulation core
//!
//! The domain core of the Biblox library management system: book catalog
//! CRUD, the loan ledger (checkout/return/renewal/fines), a per-book
//! FIFO reservation queue with lazy hold expiry, and circulation
//! reports. The web layer lives elsewhere and consumes the services
//! exposed here.

pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
