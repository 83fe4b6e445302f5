//! Circulation policy: pure date and money rules
//!
//! These modules take the current date/time as an explicit parameter and
//! do no I/O; the services layer feeds them loaded rows and persists
//! whatever they decide.

pub mod fines;
pub mod holds;
pub mod overdue;
pub mod renewal;

pub use fines::FineAssessment;
pub use renewal::RenewalDenial;
