//! Ledger input types for entry creation and validation.

use chrono::{DateTime, NaiveDate, Utc};
use folio_shared::types::{
    AccountId, AccountingPeriodId, BusinessId, JournalEntryId, JournalLineId, UserId,
};
use rust_decimal::Decimal;

use super::entry::{EntryStatus, JournalEntry, JournalLine};

/// Input for a single line of a draft entry.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
}

impl JournalLineInput {
    /// A debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// A line on whichever side the signed amount falls: positive
    /// amounts debit the account, negative amounts credit it.
    #[must_use]
    pub fn signed(account_id: AccountId, amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::credit(account_id, -amount)
        } else {
            Self::debit(account_id, amount)
        }
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct JournalEntryDraft {
    /// The business this entry belongs to.
    pub business_id: BusinessId,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional reference number (e.g., invoice number).
    pub reference: Option<String>,
    /// True for period-end adjusting entries.
    pub is_adjusting: bool,
    /// True for period-closing entries.
    pub is_closing: bool,
    /// Accounting period this entry is tied to, if any.
    pub accounting_period_id: Option<AccountingPeriodId>,
    /// The user creating the entry.
    pub created_by: UserId,
    /// The entry lines (a postable entry has at least 2).
    pub lines: Vec<JournalLineInput>,
}

impl JournalEntryDraft {
    /// Creates a plain draft with no lines.
    #[must_use]
    pub fn new(
        business_id: BusinessId,
        entry_date: NaiveDate,
        description: impl Into<String>,
        created_by: UserId,
    ) -> Self {
        Self {
            business_id,
            entry_date,
            description: description.into(),
            reference: None,
            is_adjusting: false,
            is_closing: false,
            accounting_period_id: None,
            created_by,
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    #[must_use]
    pub fn with_line(mut self, line: JournalLineInput) -> Self {
        self.lines.push(line);
        self
    }

    /// Materializes the draft into a `Draft`-status entry with fresh ids.
    #[must_use]
    pub fn into_entry(self, created_at: DateTime<Utc>) -> JournalEntry {
        let id = JournalEntryId::new();
        let lines = self
            .lines
            .into_iter()
            .map(|input| JournalLine {
                id: JournalLineId::new(),
                entry_id: id,
                account_id: input.account_id,
                debit: input.debit,
                credit: input.credit,
                description: input.description,
            })
            .collect();

        JournalEntry {
            id,
            business_id: self.business_id,
            entry_date: self.entry_date,
            description: self.description,
            reference: self.reference,
            status: EntryStatus::Draft,
            is_adjusting: self.is_adjusting,
            is_closing: self.is_closing,
            accounting_period_id: self.accounting_period_id,
            reverses: None,
            reversed_by: None,
            created_by: self.created_by,
            created_at,
            lines,
        }
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone, Copy)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
}

impl EntryTotals {
    /// Sums the lines of a draft.
    #[must_use]
    pub fn of(lines: &[JournalLineInput]) -> Self {
        Self {
            debit_total: lines.iter().map(|l| l.debit).sum(),
            credit_total: lines.iter().map(|l| l.credit).sum(),
        }
    }

    /// Signed difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit_total - self.credit_total
    }

    /// Whether the totals balance within the given tolerance.
    #[must_use]
    pub fn balanced_within(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_line_picks_side() {
        let account_id = AccountId::new();

        let debit = JournalLineInput::signed(account_id, dec!(100));
        assert_eq!(debit.debit, dec!(100));
        assert_eq!(debit.credit, dec!(0));

        let credit = JournalLineInput::signed(account_id, dec!(-100));
        assert_eq!(credit.debit, dec!(0));
        assert_eq!(credit.credit, dec!(100));
    }

    #[test]
    fn test_totals_difference() {
        let lines = vec![
            JournalLineInput::debit(AccountId::new(), dec!(800)),
            JournalLineInput::credit(AccountId::new(), dec!(700)),
        ];
        let totals = EntryTotals::of(&lines);
        assert_eq!(totals.difference(), dec!(100));
        assert!(!totals.balanced_within(dec!(0.01)));
    }

    #[test]
    fn test_totals_balanced_within_tolerance() {
        let lines = vec![
            JournalLineInput::debit(AccountId::new(), dec!(100.00)),
            JournalLineInput::credit(AccountId::new(), dec!(100.01)),
        ];
        let totals = EntryTotals::of(&lines);
        assert!(totals.balanced_within(dec!(0.01)));
        assert!(!totals.balanced_within(dec!(0.001)));
    }

    #[test]
    fn test_into_entry_assigns_line_ownership() {
        let draft = JournalEntryDraft::new(
            BusinessId::new(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            "Office rent",
            UserId::new(),
        )
        .with_line(JournalLineInput::debit(AccountId::new(), dec!(1200)))
        .with_line(JournalLineInput::credit(AccountId::new(), dec!(1200)));

        let entry = draft.into_entry(Utc::now());
        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.lines.len(), 2);
        assert!(entry.lines.iter().all(|l| l.entry_id == entry.id));
    }
}
