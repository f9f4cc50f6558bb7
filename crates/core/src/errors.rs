//! Core error types for the calendar.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use std::fmt::Display;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the calendar.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns `true` when the error was caused by the caller's input rather
    /// than by the storage layer.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for arguments and user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An argument lies outside its permitted range (non-positive ids,
    /// inverted time ranges).
    #[error("{message} (Parameter '{name}', actual value '{value}')")]
    OutOfRange {
        name: &'static str,
        value: String,
        message: String,
    },

    /// A required argument was not supplied.
    #[error("Value cannot be null. (Parameter '{0}')")]
    NullArgument(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ValidationError {
    pub fn out_of_range(
        name: &'static str,
        value: impl Display,
        message: impl Into<String>,
    ) -> Self {
        ValidationError::OutOfRange {
            name,
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending parameter, if the error refers to one.
    pub fn parameter_name(&self) -> Option<&'static str> {
        match self {
            ValidationError::OutOfRange { name, .. } => Some(name),
            ValidationError::NullArgument(name) => Some(name),
            _ => None,
        }
    }
}
