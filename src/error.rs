//! Error types for the agency integration bridge.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`StoreError`] - Registration store access errors
//! - [`ExportError`] - Submission file assembly errors
//! - [`ImportError`] - Acknowledgment file rejection errors
//! - [`ServerError`] - HTTP surface errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Per-entry reconciliation skips are deliberately *not* errors: they are
//! accounted for in the import report and never abort a batch. Only
//! structurally invalid input (malformed document, wrong receiving agency)
//! or a failing store surfaces here.

use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the registration store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the backing snapshot.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    #[error("Store JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The store mutex was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while assembling a submission file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading eligible registrations failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Document serialization failed.
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Import Errors
// =============================================================================

/// Wholesale rejections of an inbound acknowledgment file.
///
/// Any of these abort the import before a single entry is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The uploaded content is not a parseable acknowledgment document.
    #[error("Malformed acknowledgment document: {0}")]
    MalformedDocument(serde_json::Error),

    /// The inbound header names a receiving agency we are not.
    #[error("Unrecognized receiving agency: {0}")]
    UnrecognizedAgency(String),

    /// Reading or writing a registration failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ImportError> for ServerError {
    fn from(err: ImportError) -> Self {
        match err {
            // Client-side problems reject with 400, store failures are ours.
            ImportError::MalformedDocument(_) | ImportError::UnrecognizedAgency(_) => {
                ServerError::BadRequest(err.to_string())
            }
            ImportError::Store(e) => ServerError::Internal(e.to_string()),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
