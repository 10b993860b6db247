//! Error types for stockledger.
//!
//! This module defines all error types used throughout the stockledger crate,
//! covering backing-file I/O, configuration, and ledger rule violations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for stockledger operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Ledger Errors ===
    /// The ledger already holds its maximum number of products.
    #[error("stock is full ({capacity} products)")]
    StockFull {
        /// The configured capacity.
        capacity: usize,
    },

    /// A product with the same id is already in the ledger.
    #[error("a product with id '{id}' already exists")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// No product has the requested id.
    #[error("product '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Validation Errors ===
    /// The product id is empty, too long, or contains a forbidden character.
    #[error("invalid product id '{id}': {reason}")]
    InvalidId {
        /// The rejected id.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The product name is too long or contains a forbidden character.
    #[error("invalid product name: {reason}")]
    InvalidName {
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The unit price is not acceptable.
    #[error("invalid unit price {price}: {reason}")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
        /// Why it was rejected.
        reason: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Store Errors ===
    /// Failed to open the backing file for reading.
    #[error("failed to open stock file {path}: {source}")]
    StoreOpen {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the backing file.
    #[error("failed to write stock file {path}: {source}")]
    StoreWrite {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// Console or other I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for stockledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid price error.
    #[must_use]
    pub fn invalid_price(price: f64, reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            price,
            reason: reason.into(),
        }
    }

    /// Create a not found error for the given id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Check if this error is a failed id lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by rejected product input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId { .. } | Self::InvalidName { .. } | Self::InvalidPrice { .. }
        )
    }
}
