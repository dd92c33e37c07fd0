//! Posting service: the write path of the ledger.
//!
//! Validates drafts, persists them atomically together with running
//! balance updates, and supports reversal. Balance queries re-aggregate
//! posted lines so callers can cross-check the incrementally maintained
//! balances.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use folio_shared::LedgerConfig;
use folio_shared::types::{AccountId, BusinessId, JournalEntryId, UserId};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use super::balance::AccountActivity;
use super::entry::{EntryStatus, JournalEntry};
use super::error::LedgerError;
use super::store::{LedgerStore, LedgerTxn};
use super::types::{JournalEntryDraft, JournalLineInput};
use super::validation::validate_entry;
use crate::reports::{IncomeStatementReport, ReportService, TrialBalanceReport};

/// Validates an entry against transaction state, applies its balance
/// deltas, and stages it as `Posted`.
///
/// Shared between the posting service and the closing engine so closing
/// entries go through exactly the same checks.
pub(crate) fn post_to_txn<T: LedgerTxn>(
    txn: &mut T,
    mut entry: JournalEntry,
    tolerance: Decimal,
) -> Result<JournalEntry, LedgerError> {
    let totals = {
        let account_lookup = |id: AccountId| txn.account(id);
        let period_lookup = |date: NaiveDate| txn.period_containing(date);
        validate_entry(&entry.to_draft(), account_lookup, period_lookup, tolerance)?
    };
    debug!(
        debit_total = %totals.debit_total,
        credit_total = %totals.credit_total,
        "entry validated"
    );

    for line in &entry.lines {
        let account = txn
            .account(line.account_id)
            .ok_or(LedgerError::UnknownAccount(line.account_id))?;
        let delta = account
            .normal_balance()
            .balance_change(line.debit, line.credit);
        txn.apply_balance_delta(line.account_id, delta)?;
    }

    entry.status = EntryStatus::Posted;
    txn.put_entry(entry.clone());
    Ok(entry)
}

/// Journal posting service.
pub struct JournalService<S: LedgerStore> {
    store: Arc<S>,
    config: LedgerConfig,
}

impl<S: LedgerStore> JournalService<S> {
    /// Creates a service with default configuration.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    /// Creates a service with explicit configuration.
    #[must_use]
    pub fn with_config(store: Arc<S>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Stores a draft entry without posting it.
    ///
    /// Drafts may be transiently unbalanced; every invariant is enforced
    /// at posting time.
    ///
    /// # Errors
    ///
    /// `Atomicity` if the draft cannot be persisted.
    pub fn save_draft(&self, draft: JournalEntryDraft) -> Result<JournalEntry, LedgerError> {
        let entry = draft.into_entry(Utc::now());
        let mut txn = self.store.begin(entry.business_id);
        txn.put_entry(entry.clone());
        txn.commit()?;
        Ok(entry)
    }

    /// Posts a previously saved draft.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` for unknown ids, `AlreadyPosted` when the entry
    /// has left draft state, plus any validation error.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub fn post(&self, entry_id: JournalEntryId) -> Result<JournalEntry, LedgerError> {
        let stored = self
            .store
            .entry(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        let mut txn = self.store.begin(stored.business_id);

        let entry = txn
            .entry(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        if entry.status != EntryStatus::Draft {
            return Err(LedgerError::AlreadyPosted);
        }

        let posted = post_to_txn(&mut txn, entry, self.config.balance_tolerance)?;
        txn.commit()?;
        info!(business_id = %posted.business_id, "journal entry posted");
        Ok(posted)
    }

    /// Validates and posts a draft in one step.
    ///
    /// # Errors
    ///
    /// Any validation error, or `Atomicity` on commit failure.
    #[instrument(skip(self, draft), fields(business_id = %draft.business_id, date = %draft.entry_date))]
    pub fn post_new(&self, draft: JournalEntryDraft) -> Result<JournalEntry, LedgerError> {
        let mut txn = self.store.begin(draft.business_id);
        let posted = post_to_txn(&mut txn, draft.into_entry(Utc::now()), self.config.balance_tolerance)?;
        txn.commit()?;
        info!(entry_id = %posted.id, "journal entry posted");
        Ok(posted)
    }

    /// Reverses a posted entry.
    ///
    /// Creates and posts a mirror entry with every line's debit and
    /// credit swapped, dated `as_of` (today when absent), links the two
    /// entries, and marks the original `Reversed`.
    ///
    /// # Errors
    ///
    /// `EntryNotFound`, `NotPosted` for drafts, `AlreadyReversed` for
    /// double reversal; `PeriodClosed` when the reversal date falls in a
    /// closed period.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub fn reverse(
        &self,
        entry_id: JournalEntryId,
        as_of: Option<NaiveDate>,
        reversed_by: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let stored = self
            .store
            .entry(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        let mut txn = self.store.begin(stored.business_id);

        let original = txn
            .entry(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        match original.status {
            EntryStatus::Draft => return Err(LedgerError::NotPosted),
            EntryStatus::Reversed => return Err(LedgerError::AlreadyReversed),
            EntryStatus::Posted => {}
        }

        let mut draft = JournalEntryDraft::new(
            original.business_id,
            as_of.unwrap_or_else(|| Utc::now().date_naive()),
            format!("Reversal of: {}", original.description),
            reversed_by,
        );
        draft.reference = original.reference.clone();
        draft.lines = original
            .lines
            .iter()
            .map(|line| JournalLineInput {
                account_id: line.account_id,
                debit: line.credit,
                credit: line.debit,
                description: line.description.clone(),
            })
            .collect();

        let mut reversing = draft.into_entry(Utc::now());
        reversing.reverses = Some(original.id);
        let reversing = post_to_txn(&mut txn, reversing, self.config.balance_tolerance)?;
        txn.set_entry_reversed(original.id, reversing.id)?;
        txn.commit()?;
        info!(reversing_id = %reversing.id, "journal entry reversed");
        Ok(reversing)
    }

    /// Returns a stored entry.
    #[must_use]
    pub fn entry(&self, entry_id: JournalEntryId) -> Option<JournalEntry> {
        self.store.entry(entry_id)
    }

    /// Recomputes an account's balance from posted lines up to and
    /// including `as_of`, signed by the account's normal balance.
    ///
    /// When `as_of` is today this equals the running balance maintained
    /// by posting.
    ///
    /// # Errors
    ///
    /// `UnknownAccount` if the account does not exist.
    pub fn account_balance(
        &self,
        account_id: AccountId,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let account = self
            .store
            .account(account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let normal = account.normal_balance();
        let balance = self
            .store
            .posted_lines(account.business_id, as_of)
            .iter()
            .filter(|line| line.account_id == account_id)
            .map(|line| normal.balance_change(line.debit, line.credit))
            .sum();
        Ok(balance)
    }

    /// Aggregates posted activity per account up to and including
    /// `as_of`, ordered by account code.
    #[must_use]
    pub fn account_activity(&self, business_id: BusinessId, as_of: NaiveDate) -> Vec<AccountActivity> {
        self.activity_between(business_id, None, as_of)
    }

    /// Aggregates posted activity per account within a date range,
    /// ordered by account code.
    #[must_use]
    pub fn account_activity_between(
        &self,
        business_id: BusinessId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<AccountActivity> {
        self.activity_between(business_id, Some(from), to)
    }

    fn activity_between(
        &self,
        business_id: BusinessId,
        from: Option<NaiveDate>,
        to: NaiveDate,
    ) -> Vec<AccountActivity> {
        let mut by_account: HashMap<AccountId, AccountActivity> = HashMap::new();
        for line in self.store.posted_lines(business_id, to) {
            if from.is_some_and(|from| line.entry_date < from) {
                continue;
            }
            let Some(account) = self.store.account(line.account_id) else {
                continue;
            };
            by_account
                .entry(line.account_id)
                .or_insert_with(|| AccountActivity::new(&account))
                .add(line.debit, line.credit);
        }
        let mut activities: Vec<AccountActivity> = by_account.into_values().collect();
        activities.sort_by(|a, b| a.code.cmp(&b.code));
        activities
    }

    /// Generates the trial balance as of a date.
    #[must_use]
    pub fn trial_balance(&self, business_id: BusinessId, as_of: NaiveDate) -> TrialBalanceReport {
        ReportService::trial_balance(self.account_activity(business_id, as_of), as_of)
    }

    /// Generates an income statement for a date range.
    #[must_use]
    pub fn income_statement(
        &self,
        business_id: BusinessId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> IncomeStatementReport {
        ReportService::income_statement(
            self.account_activity_between(business_id, period_start, period_end),
            period_start,
            period_end,
        )
    }
}
