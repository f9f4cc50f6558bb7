//! Calendar Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules of the calendar: event values and
//! their invariants, duplicate detection, and the service that enforces both
//! before anything reaches storage. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod calendar;
pub mod errors;
pub mod validation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
