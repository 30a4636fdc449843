//! Error types for SplitLedger.

use crate::TripId;
use thiserror::Error;

/// Main error type for SplitLedger operations.
#[derive(Error, Debug)]
pub enum SplitLedgerError {
    /// A required request field was absent or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An amount was zero, negative or not a number.
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: String },

    /// An event handed to the ledger engine was malformed.
    #[error("Invalid {kind} event at position {index}: {reason}")]
    InvalidEvent {
        index: usize,
        kind: &'static str,
        reason: String,
    },

    /// Trip holds more events than the service is configured to net.
    #[error("Trip {trip_id} has {count} events, limit is {max}")]
    TooManyEvents {
        trip_id: TripId,
        count: usize,
        max: usize,
    },

    /// Balances could not be netted within the decimal range.
    #[error("Balance overflow: {0}")]
    Overflow(String),

    /// Persistence collaborator failed.
    #[error("Store error: {0}")]
    StoreError(String),
}

impl SplitLedgerError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SplitLedgerError::StoreError(_))
    }

    /// Stable error code for consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            SplitLedgerError::MissingField(_) => "MISSING_FIELD",
            SplitLedgerError::InvalidAmount { .. } => "INVALID_AMOUNT",
            SplitLedgerError::InvalidEvent { .. } => "INVALID_EVENT",
            SplitLedgerError::TooManyEvents { .. } => "TOO_MANY_EVENTS",
            SplitLedgerError::Overflow(_) => "BALANCE_OVERFLOW",
            SplitLedgerError::StoreError(_) => "STORE_ERROR",
        }
    }
}

/// Result type alias for SplitLedger operations.
pub type Result<T> = std::result::Result<T, SplitLedgerError>;
