//! Transactional store seam for the ledger core.
//!
//! The core stays free of SQL and web dependencies; durable storage is
//! reached through these traits. The shape mirrors a database
//! transaction: `begin` hands out a transaction scoped to one business,
//! writes are staged on it, and `commit` makes them visible atomically.
//! Dropping a transaction without committing rolls it back.

use chrono::NaiveDate;
use folio_shared::types::{
    AccountId, AccountingPeriodId, BusinessId, JournalEntryId,
};
use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::LedgerError;
use crate::accounts::{Account, AccountRegistry, AccountRole, AccountType};
use crate::fiscal::period::AccountingPeriod;

/// A flattened line of a posted entry, as read back for aggregation.
///
/// Lines of `Reversed` entries are included: reversal does not unwind
/// the original posting, the reversing entry cancels it.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The owning entry.
    pub entry_id: JournalEntryId,
    /// The owning entry's date.
    pub entry_date: NaiveDate,
    /// The account the line posts to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Durable ledger storage.
///
/// Serialization contract: transactions touching the same business must
/// not interleave their balance read-modify-writes. Implementations
/// either lock per business or rely on the underlying storage
/// transaction for the same guarantee.
pub trait LedgerStore: AccountRegistry {
    /// The transaction type handed out by `begin`.
    type Txn<'a>: LedgerTxn
    where
        Self: 'a;

    /// Opens a transaction scoped to one business.
    fn begin(&self, business_id: BusinessId) -> Self::Txn<'_>;

    /// Returns a journal entry by id.
    fn entry(&self, id: JournalEntryId) -> Option<JournalEntry>;

    /// Returns an accounting period by id.
    fn period(&self, id: AccountingPeriodId) -> Option<AccountingPeriod>;

    /// Returns the accounting period containing the given date, if any.
    fn period_containing(&self, business_id: BusinessId, date: NaiveDate)
    -> Option<AccountingPeriod>;

    /// Returns all posted lines for a business dated on or before
    /// `as_of`, in posting order.
    fn posted_lines(&self, business_id: BusinessId, as_of: NaiveDate) -> Vec<PostedLine>;
}

/// A store transaction scoped to one business.
///
/// Reads observe writes staged earlier in the same transaction.
pub trait LedgerTxn {
    /// Returns an account by id.
    fn account(&self, id: AccountId) -> Option<Account>;

    /// Lists accounts of the given type, ordered by code.
    fn accounts_by_type(&self, account_type: AccountType) -> Vec<Account>;

    /// Finds the active account carrying the given role.
    fn account_by_role(&self, role: AccountRole) -> Option<Account>;

    /// Finds an active account by case-insensitive name fragment.
    fn find_account_by_name_fragment(&self, fragment: &str) -> Option<Account>;

    /// Returns a journal entry by id.
    fn entry(&self, id: JournalEntryId) -> Option<JournalEntry>;

    /// Returns the accounting period containing the given date, if any.
    fn period_containing(&self, date: NaiveDate) -> Option<AccountingPeriod>;

    /// Returns all posted lines dated on or before `as_of`.
    fn posted_lines(&self, as_of: NaiveDate) -> Vec<PostedLine>;

    /// Stages an entry insert or update.
    fn put_entry(&mut self, entry: JournalEntry);

    /// Stages a reversal marker on a posted entry.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` if the entry does not exist, `NotPosted` if it
    /// was never posted, `AlreadyReversed` if already marked.
    fn set_entry_reversed(
        &mut self,
        id: JournalEntryId,
        reversed_by: JournalEntryId,
    ) -> Result<(), LedgerError>;

    /// Stages a running-balance adjustment on an account.
    ///
    /// # Errors
    ///
    /// `UnknownAccount` if the account does not exist.
    fn apply_balance_delta(
        &mut self,
        account_id: AccountId,
        delta: Decimal,
    ) -> Result<(), LedgerError>;

    /// Stages a period insert or update.
    fn put_period(&mut self, period: AccountingPeriod);

    /// Commits all staged writes atomically.
    ///
    /// # Errors
    ///
    /// `Atomicity` if the writes cannot be made visible as a unit.
    fn commit(self) -> Result<(), LedgerError>;
}
