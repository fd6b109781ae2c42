//! Typed error types for inventory import and retrieval.

use std::io;

/// Inventory error conditions.
///
/// Use [`InventoryError::is_retryable()`] to classify transient vs permanent
/// failures when fetching a snapshot.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    // -- Import / normalization --
    /// The payload is not valid JSON.
    #[error("invalid inventory JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload is not readable CSV.
    #[error("invalid inventory CSV: {0}")]
    InvalidCsv(#[from] csv::Error),

    /// The top-level JSON value is not an array.
    #[error("Invalid data format. Expected an array.")]
    NotAnArray,

    /// An array element is not a JSON object.
    #[error("Item at index {index} is not an object.")]
    NotAnObject {
        /// 1-based position of the offending item.
        index: usize,
    },

    /// An array element lacks one of the required string fields.
    #[error(
        "Item at index {index} must have name, modelNumber, and manufacturingDate as non-empty strings."
    )]
    MissingField {
        /// 1-based position of the offending item.
        index: usize,
        /// Canonical name of the first missing or empty field.
        field: &'static str,
    },

    // -- File checks --
    /// The import file exceeds the size limit.
    #[error("File size exceeds 5MB. Please upload a smaller file.")]
    FileTooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// The import file has an extension other than `.json` or `.csv`.
    #[error("Please upload a valid JSON or CSV file (got {extension:?}).")]
    UnsupportedFormat {
        /// The lower-cased extension, or an empty string when absent.
        extension: String,
    },

    // -- Retrieval --
    /// Reading the inventory source failed.
    #[error("failed to read inventory from {path}")]
    Io {
        /// Location that was read.
        path: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The inventory source reported itself unavailable.
    #[error("inventory unavailable: {0}")]
    Unavailable(String),

    /// All retry attempts have been exhausted.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Total number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        last_error: Box<InventoryError>,
    },

    // -- Configuration --
    /// An invalid configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InventoryError {
    /// Whether a fetch that failed with this error may succeed if repeated.
    ///
    /// Malformed data is permanent: the same payload would fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InventoryError::Io { .. } | InventoryError::Unavailable(_))
    }
}
