//! Typed error handling for the catalog explorer
//!
//! Every failure in the catalog has a defined degraded behaviour, so the
//! error types here are mostly about letting callers tell failures apart.
//!
//! # Error Categories
//!
//! - [`FetchError`]: simulated network boundary (transient failure vs. not found)
//! - [`StorageError`]: key-value persistence backends
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match api.get("itm_999").await {
//!     Ok(product) => println!("Found: {}", product.name),
//!     Err(FetchError::NotFound { id }) => println!("{} does not exist", id),
//!     Err(e) if e.is_retryable() => println!("Try again: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The aggregate error type of the crate
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product fetch errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persistence errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CatalogError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Fetch(e) => e.error_code(),
            CatalogError::Storage(e) => e.error_code(),
            CatalogError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether repeating the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Fetch(e) => e.is_retryable(),
            CatalogError::Storage(_) => true,
            CatalogError::Config(_) => false,
        }
    }

    /// Convert to a serializable error report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }
}

/// Serializable error summary handed to presentation code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether a retry button makes sense
    pub retryable: bool,
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors surfaced by the simulated network boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transient failure; the same request may be retried
    #[error("{message}")]
    Network { message: String },

    /// The requested product does not exist; retrying will not help
    #[error("Product '{id}' not found")]
    NotFound { id: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        FetchError::NotFound { id: id.into() }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "NETWORK_ERROR",
            FetchError::NotFound { .. } => "PRODUCT_NOT_FOUND",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to key-value persistence
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed
    #[error("Failed to read '{key}' from {backend} storage: {message}")]
    Read {
        backend: &'static str,
        key: String,
        message: String,
    },

    /// Writing a key failed
    #[error("Failed to write '{key}' to {backend} storage: {message}")]
    Write {
        backend: &'static str,
        key: String,
        message: String,
    },

    /// Stored value could not be decoded
    #[error("Stored value under '{key}' is malformed: {message}")]
    Decode { key: String, message: String },

    /// Backend could not be opened or is not compiled in
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Read { .. } => "STORAGE_READ_FAILED",
            StorageError::Write { .. } => "STORAGE_WRITE_FAILED",
            StorageError::Decode { .. } => "STORAGE_DECODE_FAILED",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}
