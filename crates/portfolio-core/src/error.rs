//! Error types for the portfolio widgets

use thiserror::Error;

/// Main error type for portfolio widget operations
///
/// The in-game clock itself never fails; these cover the surrounding
/// widgets (storage, card loading, user input parsing).
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Error during storage operations (redb)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Card catalog could not be loaded
    #[error("Failed to load cards: {0}")]
    CardsLoad(String),

    /// Unknown zone name
    #[error("Invalid zone '{0}': expected 'left' or 'right'")]
    InvalidZone(String),

    /// Craft duration outside the accepted field ranges
    #[error("Invalid craft duration: {0}")]
    InvalidDuration(String),
}

/// Result type alias using PortfolioError
pub type PortfolioResult<T> = Result<T, PortfolioError>;
