//! SQLite storage implementation for the calendar.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `calendar-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The event repository and its database model types
//! - Demo data seeding
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod events;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from calendar-core for convenience
pub use calendar_core::errors::{DatabaseError, Error, Result};
