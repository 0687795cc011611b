//! Common error types for Tunegraph

use thiserror::Error;

/// Common result type for Tunegraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Tunegraph crates
///
/// Routine recommendation misses (unknown song id in a similarity query,
/// absent username in a social query) are NOT errors - those paths return
/// empty results or `false`. Errors are reserved for CRUD operations on
/// missing entities, failed search tasks, and configuration problems.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested entity not found (CRUD paths only)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A concurrent search task failed or timed out
    #[error("Search error: {0}")]
    Search(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
