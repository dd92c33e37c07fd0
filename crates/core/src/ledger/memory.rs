//! In-memory ledger store.
//!
//! Reference implementation of the store seam, used by tests and by
//! embedding callers that do not need durability. One mutex serializes
//! all transactions; a transaction works on a copy of the business's
//! book and commit swaps the copy in with a single assignment, so a
//! dropped transaction is a rollback and a failed close never leaves
//! partial postings behind.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use folio_shared::types::{
    AccountId, AccountingPeriodId, BusinessId, JournalEntryId,
};
use rust_decimal::Decimal;

use super::entry::{EntryStatus, JournalEntry};
use super::error::LedgerError;
use super::store::{LedgerStore, LedgerTxn, PostedLine};
use crate::accounts::{Account, AccountRegistry, AccountRole, AccountType};
use crate::fiscal::period::AccountingPeriod;

/// Everything the ledger holds for one business.
#[derive(Debug, Clone, Default)]
struct BusinessBook {
    accounts: HashMap<AccountId, Account>,
    entries: HashMap<JournalEntryId, JournalEntry>,
    entry_order: Vec<JournalEntryId>,
    periods: HashMap<AccountingPeriodId, AccountingPeriod>,
}

impl BusinessBook {
    fn accounts_by_type(&self, account_type: AccountType) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .values()
            .filter(|a| a.account_type == account_type)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    fn account_by_role(&self, role: AccountRole) -> Option<Account> {
        self.accounts
            .values()
            .filter(|a| a.is_active && a.role == Some(role))
            .min_by(|a, b| a.code.cmp(&b.code))
            .cloned()
    }

    fn account_by_name_fragment(&self, fragment: &str) -> Option<Account> {
        let needle = fragment.to_lowercase();
        self.accounts
            .values()
            .filter(|a| a.is_active && a.name.to_lowercase().contains(&needle))
            .min_by(|a, b| a.code.cmp(&b.code))
            .cloned()
    }

    fn period_containing(&self, date: NaiveDate) -> Option<AccountingPeriod> {
        self.periods
            .values()
            .find(|p| p.contains_date(date))
            .cloned()
    }

    fn posted_lines(&self, as_of: NaiveDate) -> Vec<PostedLine> {
        self.entry_order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(|e| e.status.is_posted() && e.entry_date <= as_of)
            .flat_map(|e| {
                e.lines.iter().map(|line| PostedLine {
                    entry_id: e.id,
                    entry_date: e.entry_date,
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect()
    }

    fn put_entry(&mut self, entry: JournalEntry) {
        if !self.entries.contains_key(&entry.id) {
            self.entry_order.push(entry.id);
        }
        self.entries.insert(entry.id, entry);
    }
}

/// In-memory ledger store.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    books: Mutex<HashMap<BusinessId, BusinessBook>>,
}

impl MemoryLedger {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BusinessId, BusinessBook>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an account to a business's chart of accounts.
    pub fn insert_account(&self, account: Account) {
        self.lock()
            .entry(account.business_id)
            .or_default()
            .accounts
            .insert(account.id, account);
    }

    /// Deactivates an account. Accounts referenced by posted lines are
    /// never removed; this is the only supported form of retirement.
    ///
    /// Returns false if the account does not exist.
    pub fn deactivate_account(&self, id: AccountId) -> bool {
        let mut books = self.lock();
        for book in books.values_mut() {
            if let Some(account) = book.accounts.get_mut(&id) {
                account.is_active = false;
                return true;
            }
        }
        false
    }
}

impl AccountRegistry for MemoryLedger {
    fn account(&self, id: AccountId) -> Option<Account> {
        self.lock()
            .values()
            .find_map(|book| book.accounts.get(&id))
            .cloned()
    }

    fn accounts_by_type(
        &self,
        business_id: BusinessId,
        account_type: AccountType,
    ) -> Vec<Account> {
        self.lock()
            .get(&business_id)
            .map(|book| book.accounts_by_type(account_type))
            .unwrap_or_default()
    }

    fn account_by_role(&self, business_id: BusinessId, role: AccountRole) -> Option<Account> {
        self.lock()
            .get(&business_id)
            .and_then(|book| book.account_by_role(role))
    }

    fn find_account_by_name_fragment(
        &self,
        business_id: BusinessId,
        fragment: &str,
    ) -> Option<Account> {
        self.lock()
            .get(&business_id)
            .and_then(|book| book.account_by_name_fragment(fragment))
    }
}

impl LedgerStore for MemoryLedger {
    type Txn<'a>
        = MemoryTxn<'a>
    where
        Self: 'a;

    fn begin(&self, business_id: BusinessId) -> MemoryTxn<'_> {
        let books = self.lock();
        let work = books.get(&business_id).cloned().unwrap_or_default();
        MemoryTxn {
            books,
            business_id,
            work,
        }
    }

    fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.lock()
            .values()
            .find_map(|book| book.entries.get(&id))
            .cloned()
    }

    fn period(&self, id: AccountingPeriodId) -> Option<AccountingPeriod> {
        self.lock()
            .values()
            .find_map(|book| book.periods.get(&id))
            .cloned()
    }

    fn period_containing(
        &self,
        business_id: BusinessId,
        date: NaiveDate,
    ) -> Option<AccountingPeriod> {
        self.lock()
            .get(&business_id)
            .and_then(|book| book.period_containing(date))
    }

    fn posted_lines(&self, business_id: BusinessId, as_of: NaiveDate) -> Vec<PostedLine> {
        self.lock()
            .get(&business_id)
            .map(|book| book.posted_lines(as_of))
            .unwrap_or_default()
    }
}

/// A transaction against `MemoryLedger`.
///
/// Holds the store lock for its whole lifetime, which serializes all
/// posting per the store contract.
#[derive(Debug)]
pub struct MemoryTxn<'a> {
    books: MutexGuard<'a, HashMap<BusinessId, BusinessBook>>,
    business_id: BusinessId,
    work: BusinessBook,
}

impl LedgerTxn for MemoryTxn<'_> {
    fn account(&self, id: AccountId) -> Option<Account> {
        self.work.accounts.get(&id).cloned()
    }

    fn accounts_by_type(&self, account_type: AccountType) -> Vec<Account> {
        self.work.accounts_by_type(account_type)
    }

    fn account_by_role(&self, role: AccountRole) -> Option<Account> {
        self.work.account_by_role(role)
    }

    fn find_account_by_name_fragment(&self, fragment: &str) -> Option<Account> {
        self.work.account_by_name_fragment(fragment)
    }

    fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.work.entries.get(&id).cloned()
    }

    fn period_containing(&self, date: NaiveDate) -> Option<AccountingPeriod> {
        self.work.period_containing(date)
    }

    fn posted_lines(&self, as_of: NaiveDate) -> Vec<PostedLine> {
        self.work.posted_lines(as_of)
    }

    fn put_entry(&mut self, entry: JournalEntry) {
        self.work.put_entry(entry);
    }

    fn set_entry_reversed(
        &mut self,
        id: JournalEntryId,
        reversed_by: JournalEntryId,
    ) -> Result<(), LedgerError> {
        let entry = self
            .work
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        match entry.status {
            EntryStatus::Draft => Err(LedgerError::NotPosted),
            EntryStatus::Reversed => Err(LedgerError::AlreadyReversed),
            EntryStatus::Posted => {
                entry.status = EntryStatus::Reversed;
                entry.reversed_by = Some(reversed_by);
                Ok(())
            }
        }
    }

    fn apply_balance_delta(
        &mut self,
        account_id: AccountId,
        delta: Decimal,
    ) -> Result<(), LedgerError> {
        let account = self
            .work
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        account.balance += delta;
        Ok(())
    }

    fn put_period(&mut self, period: AccountingPeriod) {
        self.work.periods.insert(period.id, period);
    }

    fn commit(mut self) -> Result<(), LedgerError> {
        let book = std::mem::take(&mut self.work);
        self.books.insert(self.business_id, book);
        Ok(())
    }
}
