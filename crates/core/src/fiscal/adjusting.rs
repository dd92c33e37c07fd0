//! Templated adjusting entries.
//!
//! Period-end adjustments are all the same two-line shape: one debit,
//! one credit. The constructors name the accounts by their role in each
//! template so call sites cannot swap the sides.

use chrono::NaiveDate;
use folio_shared::types::{AccountId, AccountingPeriodId, BusinessId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::types::{JournalEntryDraft, JournalLineInput};

/// Kind of period-end adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustingEntryKind {
    /// Depreciation of a fixed asset.
    Depreciation,
    /// Expense incurred but not yet paid.
    AccruedExpense,
    /// Consumption of a prepaid asset.
    PrepaidExpense,
    /// Revenue earned that was previously collected in advance.
    UnearnedRevenue,
}

/// A templated adjusting entry: debit one account, credit another.
#[derive(Debug, Clone)]
pub struct AdjustingEntryInput {
    /// The template this adjustment follows.
    pub kind: AdjustingEntryKind,
    /// Account receiving the debit leg.
    pub debit_account: AccountId,
    /// Account receiving the credit leg.
    pub credit_account: AccountId,
    /// Adjustment amount.
    pub amount: Decimal,
    /// Entry description.
    pub description: String,
}

impl AdjustingEntryInput {
    /// Depreciation: debit depreciation expense, credit accumulated
    /// depreciation.
    #[must_use]
    pub fn depreciation(
        expense_account: AccountId,
        accumulated_depreciation_account: AccountId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: AdjustingEntryKind::Depreciation,
            debit_account: expense_account,
            credit_account: accumulated_depreciation_account,
            amount,
            description: description.into(),
        }
    }

    /// Accrued expense: debit the expense, credit the payable.
    #[must_use]
    pub fn accrued_expense(
        expense_account: AccountId,
        payable_account: AccountId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: AdjustingEntryKind::AccruedExpense,
            debit_account: expense_account,
            credit_account: payable_account,
            amount,
            description: description.into(),
        }
    }

    /// Prepaid expense consumed: debit the expense, credit the prepaid
    /// asset.
    #[must_use]
    pub fn prepaid_expense(
        expense_account: AccountId,
        prepaid_asset_account: AccountId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: AdjustingEntryKind::PrepaidExpense,
            debit_account: expense_account,
            credit_account: prepaid_asset_account,
            amount,
            description: description.into(),
        }
    }

    /// Unearned revenue earned: debit the liability, credit the revenue.
    #[must_use]
    pub fn unearned_revenue(
        unearned_revenue_account: AccountId,
        revenue_account: AccountId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: AdjustingEntryKind::UnearnedRevenue,
            debit_account: unearned_revenue_account,
            credit_account: revenue_account,
            amount,
            description: description.into(),
        }
    }

    /// Materializes the template as a draft tied to a period.
    #[must_use]
    pub fn into_draft(
        self,
        business_id: BusinessId,
        entry_date: NaiveDate,
        accounting_period_id: Option<AccountingPeriodId>,
        created_by: UserId,
    ) -> JournalEntryDraft {
        let mut draft = JournalEntryDraft::new(business_id, entry_date, self.description, created_by)
            .with_line(JournalLineInput::debit(self.debit_account, self.amount))
            .with_line(JournalLineInput::credit(self.credit_account, self.amount));
        draft.is_adjusting = true;
        draft.accounting_period_id = accounting_period_id;
        draft
    }
}
