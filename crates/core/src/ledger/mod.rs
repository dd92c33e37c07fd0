//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal entries and lines (debits and credits)
//! - Business rule validation
//! - Balance calculations
//! - The transactional store seam and its in-memory implementation
//! - The posting service (post, reverse, balance queries)
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod memory;
pub mod posting;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod posting_props;
#[cfg(test)]
mod validation_props;

pub use balance::{AccountActivity, NormalBalance};
pub use entry::{EntryStatus, JournalEntry, JournalLine};
pub use error::LedgerError;
pub use memory::MemoryLedger;
pub use posting::JournalService;
pub use store::{LedgerStore, LedgerTxn, PostedLine};
pub use types::{EntryTotals, JournalEntryDraft, JournalLineInput};
pub use validation::validate_entry;
