//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger
//! operations: entry validation errors, account errors, accounting
//! period errors, and entry state errors. Validation errors are always
//! returned to the caller as values, never panicked.

use folio_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry description must not be empty.
    #[error("Entry description must not be empty")]
    MissingDescription,

    /// Entry must have at least 2 lines.
    #[error("Entry must have at least 2 lines")]
    InsufficientLines,

    /// Line has both a debit and a credit amount.
    #[error("Line {index} has both a debit and a credit amount")]
    AmbiguousLine {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Line has neither a debit nor a credit amount.
    #[error("Line {index} has neither a debit nor a credit amount")]
    EmptyLine {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Line amount cannot be negative.
    #[error("Line {index} has a negative amount")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Entry debits and credits do not balance.
    #[error("Entry is out of balance by {delta}")]
    Unbalanced {
        /// Signed difference: debits minus credits.
        delta: Decimal,
    },

    // ========== Account Errors ==========
    /// Account referenced by a line does not exist.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountId),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    InactiveAccount(AccountId),

    // ========== Accounting Period Errors ==========
    /// Accounting period is closed, no posting allowed.
    #[error("Accounting period is closed, no posting allowed")]
    PeriodClosed,

    // ========== Entry State Errors ==========
    /// Entry has already been posted.
    #[error("Entry has already been posted")]
    AlreadyPosted,

    /// Entry is not posted.
    #[error("Entry is not posted")]
    NotPosted,

    /// Entry has already been reversed.
    #[error("Entry has already been reversed")]
    AlreadyReversed,

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    // ========== Storage Errors ==========
    /// Atomic commit failed; no partial state was written.
    #[error("Atomic commit failed: {0}")]
    Atomicity(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::AmbiguousLine { .. } => "AMBIGUOUS_LINE",
            Self::EmptyLine { .. } => "EMPTY_LINE",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InactiveAccount(_) => "INACTIVE_ACCOUNT",
            Self::PeriodClosed => "PERIOD_CLOSED",
            Self::AlreadyPosted => "ALREADY_POSTED",
            Self::NotPosted => "NOT_POSTED",
            Self::AlreadyReversed => "ALREADY_REVERSED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Atomicity(_) => "ATOMICITY_FAILURE",
        }
    }

    /// Returns true if this error is a caller mistake rather than a
    /// system fault.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Atomicity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InsufficientLines.error_code(),
            "INSUFFICIENT_LINES"
        );
        assert_eq!(
            LedgerError::Unbalanced { delta: dec!(100) }.error_code(),
            "UNBALANCED"
        );
        assert_eq!(LedgerError::PeriodClosed.error_code(), "PERIOD_CLOSED");
        assert_eq!(
            LedgerError::AlreadyReversed.error_code(),
            "ALREADY_REVERSED"
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Unbalanced { delta: dec!(100) };
        assert_eq!(err.to_string(), "Entry is out of balance by 100");

        let err = LedgerError::AmbiguousLine { index: 2 };
        assert_eq!(
            err.to_string(),
            "Line 2 has both a debit and a credit amount"
        );
    }

    #[test]
    fn test_caller_errors() {
        assert!(LedgerError::NotPosted.is_caller_error());
        assert!(LedgerError::AlreadyReversed.is_caller_error());
        assert!(!LedgerError::Atomicity("partial write".into()).is_caller_error());
    }
}
