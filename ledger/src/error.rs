//! Ledger engine error types.

use splitledger_common::{SplitLedgerError, UserId};
use thiserror::Error;

/// Errors that can occur while netting a set of events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// An event violates the engine's input contract.
    #[error("Invalid {kind} event at position {index}: {reason}")]
    InvalidEvent {
        index: usize,
        kind: &'static str,
        reason: String,
    },

    /// A gross balance left the representable decimal range.
    #[error("Balance overflow while applying {kind} event at position {index}")]
    Overflow { index: usize, kind: &'static str },

    /// Netting the two directions of a pair left the decimal range.
    #[error("Net balance overflow between {borrower} and {lender}")]
    NetOverflow { borrower: UserId, lender: UserId },
}

impl LedgerError {
    /// Position of the offending event in the input sequence, if the
    /// failure is tied to a single event.
    pub fn index(&self) -> Option<usize> {
        match self {
            LedgerError::InvalidEvent { index, .. } | LedgerError::Overflow { index, .. } => {
                Some(*index)
            }
            LedgerError::NetOverflow { .. } => None,
        }
    }
}

impl From<LedgerError> for SplitLedgerError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidEvent {
                index,
                kind,
                reason,
            } => SplitLedgerError::InvalidEvent {
                index,
                kind,
                reason,
            },
            LedgerError::Overflow { index, kind } => SplitLedgerError::InvalidEvent {
                index,
                kind,
                reason: "balance overflow".to_string(),
            },
            err @ LedgerError::NetOverflow { .. } => SplitLedgerError::Overflow(err.to_string()),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_overflow_maps_to_overflow_code() {
        let err = LedgerError::NetOverflow {
            borrower: UserId::new("u2"),
            lender: UserId::new("u1"),
        };
        assert_eq!(err.index(), None);

        let converted = SplitLedgerError::from(err);
        assert_eq!(converted.error_code(), "BALANCE_OVERFLOW");
        assert_eq!(
            converted.to_string(),
            "Balance overflow: Net balance overflow between u2 and u1"
        );
    }
}
