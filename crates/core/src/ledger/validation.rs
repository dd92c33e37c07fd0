//! Business rule validation for journal entries.
//!
//! The validator is a pure function over the draft plus injected
//! account and period lookups; it performs no writes, so it can run
//! with unbounded concurrency.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use folio_shared::types::AccountId;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalEntryDraft};
use crate::accounts::Account;
use crate::fiscal::period::AccountingPeriod;

/// Validates a draft entry for posting.
///
/// Checks, in order, all of which must pass before the entry may
/// transition to `Posted`:
/// 1. non-empty description;
/// 2. at least two lines (double-entry requires two legs);
/// 3. every line references an existing, active account;
/// 4. every line carries a non-negative amount on exactly one side;
/// 5. debits equal credits within `tolerance`;
/// 6. the entry date does not fall inside a closed accounting period.
///
/// Period containment is by date; explicit period links are assigned by
/// the closing engine while the period row is still open.
///
/// # Errors
///
/// Returns the first violated rule as a `LedgerError`.
pub fn validate_entry<A, P>(
    draft: &JournalEntryDraft,
    account_lookup: A,
    period_lookup: P,
    tolerance: Decimal,
) -> Result<EntryTotals, LedgerError>
where
    A: Fn(AccountId) -> Option<Account>,
    P: Fn(NaiveDate) -> Option<AccountingPeriod>,
{
    // 1. Description
    if draft.description.trim().is_empty() {
        return Err(LedgerError::MissingDescription);
    }

    // 2. Minimum lines
    if draft.lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    // 3. Account existence and activity
    for line in &draft.lines {
        let account =
            account_lookup(line.account_id).ok_or(LedgerError::UnknownAccount(line.account_id))?;
        if !account.is_active {
            return Err(LedgerError::InactiveAccount(line.account_id));
        }
    }

    // 4. Exactly one non-zero side per line
    for (index, line) in draft.lines.iter().enumerate() {
        if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
            return Err(LedgerError::NegativeAmount { index });
        }
        match (line.debit.is_zero(), line.credit.is_zero()) {
            (false, false) => return Err(LedgerError::AmbiguousLine { index }),
            (true, true) => return Err(LedgerError::EmptyLine { index }),
            _ => {}
        }
    }

    // 5. Balance
    let totals = EntryTotals::of(&draft.lines);
    if !totals.balanced_within(tolerance) {
        return Err(LedgerError::Unbalanced {
            delta: totals.difference(),
        });
    }

    // 6. Period must not be closed
    if let Some(period) = period_lookup(draft.entry_date) {
        if period.is_closed() {
            return Err(LedgerError::PeriodClosed);
        }
    }

    Ok(totals)
}
