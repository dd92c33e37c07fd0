//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use folio_shared::types::{
    AccountId, AccountingPeriodId, BusinessId, JournalEntryId, JournalLineId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{JournalEntryDraft, JournalLineInput};

/// Journal entry lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified. May be transiently
    /// unbalanced.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been posted and later reversed (immutable; its lines
    /// still count, the reversing entry cancels them).
    Reversed,
}

impl EntryStatus {
    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry's lines contribute to balances.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

/// A single line of a journal entry.
///
/// Exactly one of `debit`/`credit` is non-zero on a valid line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier for this line.
    pub id: JournalLineId,
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional description for this line item.
    pub description: Option<String>,
}

impl JournalLine {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A journal entry consisting of balanced debit and credit lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Business this entry belongs to.
    pub business_id: BusinessId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Optional reference number.
    pub reference: Option<String>,
    /// Current status.
    pub status: EntryStatus,
    /// True for period-end adjusting entries.
    pub is_adjusting: bool,
    /// True for period-closing entries.
    pub is_closing: bool,
    /// Accounting period this entry is tied to, if any.
    pub accounting_period_id: Option<AccountingPeriodId>,
    /// The posted entry this one reverses, if any.
    pub reverses: Option<JournalEntryId>,
    /// The entry that reversed this one, if any.
    pub reversed_by: Option<JournalEntryId>,
    /// User who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Entry lines.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Returns true if the entry can be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Returns true if the entry can be reversed.
    #[must_use]
    pub fn can_reverse(&self) -> bool {
        self.status == EntryStatus::Posted && self.reversed_by.is_none()
    }

    /// Re-projects the entry as a draft for validation purposes.
    #[must_use]
    pub fn to_draft(&self) -> JournalEntryDraft {
        JournalEntryDraft {
            business_id: self.business_id,
            entry_date: self.entry_date,
            description: self.description.clone(),
            reference: self.reference.clone(),
            is_adjusting: self.is_adjusting,
            is_closing: self.is_closing,
            accounting_period_id: self.accounting_period_id,
            created_by: self.created_by,
            lines: self
                .lines
                .iter()
                .map(|line| JournalLineInput {
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                    description: line.description.clone(),
                })
                .collect(),
        }
    }
}
