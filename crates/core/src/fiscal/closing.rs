//! Period closing engine.
//!
//! Computes period-end revenue and expense totals, generates the
//! cascading closing entries that zero temporary accounts through
//! Income Summary into Retained Earnings, and locks the period. The
//! whole close runs inside one store transaction: a failure at any step
//! rolls back adjusting entries, closing entries, and the period row
//! together.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use folio_shared::LedgerConfig;
use folio_shared::types::{BusinessId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::adjusting::AdjustingEntryInput;
use super::period::AccountingPeriod;
use crate::accounts::{Account, AccountRole, AccountType};
use crate::ledger::entry::JournalEntry;
use crate::ledger::error::LedgerError;
use crate::ledger::posting::post_to_txn;
use crate::ledger::store::{LedgerStore, LedgerTxn};
use crate::ledger::types::{JournalEntryDraft, JournalLineInput};

/// Result of a successful period close.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodCloseSummary {
    /// The closed period.
    pub period: AccountingPeriod,
    /// Adjusting entries posted during the close.
    pub adjusting_entries: Vec<JournalEntry>,
    /// Closing entries posted during the close.
    pub closing_entries: Vec<JournalEntry>,
    /// Revenue total swept into Income Summary.
    pub total_revenue: Decimal,
    /// Expense total swept into Income Summary.
    pub total_expenses: Decimal,
    /// Net income (negative for a net loss).
    pub net_income: Decimal,
}

/// Period closing service.
pub struct ClosingService<S: LedgerStore> {
    store: Arc<S>,
    config: LedgerConfig,
}

impl<S: LedgerStore> ClosingService<S> {
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

    /// Closes the monthly period ending at `period_end`.
    ///
    /// Posts the supplied adjusting entries, then the closing cascade:
    /// revenue accounts into Income Summary, expense accounts into
    /// Income Summary, Income Summary into Retained Earnings; finally
    /// marks the period closed. All of it commits atomically or not at
    /// all.
    ///
    /// A closing sub-step is skipped with a warning when the business's
    /// chart has no matching closing account.
    ///
    /// # Errors
    ///
    /// `PeriodClosed` when the period is already closed; any validation
    /// error from an adjusting or closing entry; `Atomicity` on commit
    /// failure.
    #[instrument(skip(self, adjusting), fields(business_id = %business_id, period_end = %period_end))]
    pub fn close_period(
        &self,
        business_id: BusinessId,
        period_end: NaiveDate,
        adjusting: Vec<AdjustingEntryInput>,
        closed_by: UserId,
    ) -> Result<PeriodCloseSummary, LedgerError> {
        let mut txn = self.store.begin(business_id);

        // Find or create the period row. A leftover Open row from a
        // failed close is reused; a Closed one is final.
        let mut period = match txn.period_containing(period_end) {
            Some(period) if period.is_closed() => return Err(LedgerError::PeriodClosed),
            Some(period) => period,
            None => {
                let period = AccountingPeriod::monthly(business_id, period_end);
                txn.put_period(period.clone());
                period
            }
        };

        let mut adjusting_entries = Vec::with_capacity(adjusting.len());
        for input in adjusting {
            let draft = input.into_draft(business_id, period_end, Some(period.id), closed_by);
            let entry = post_to_txn(&mut txn, draft.into_entry(Utc::now()), self.config.balance_tolerance)?;
            adjusting_entries.push(entry);
        }

        let income_summary = self.closing_account(
            &txn,
            AccountRole::IncomeSummary,
            &self.config.income_summary_fragment,
        );
        let retained_earnings = self.closing_account(
            &txn,
            AccountRole::RetainedEarnings,
            &self.config.retained_earnings_fragment,
        );

        let mut closing_entries = Vec::new();

        // Revenue close: debit each revenue account down to zero,
        // credit Income Summary with the total.
        let revenue_balances = type_balances(&txn, AccountType::Revenue, period_end);
        let total_revenue: Decimal = revenue_balances.iter().map(|(_, balance)| balance).sum();
        if !total_revenue.is_zero() {
            if let Some(income_summary) = &income_summary {
                let mut lines: Vec<JournalLineInput> = revenue_balances
                    .iter()
                    .map(|(account, balance)| JournalLineInput::signed(account.id, *balance))
                    .collect();
                lines.push(JournalLineInput::signed(income_summary.id, -total_revenue));
                let draft =
                    closing_draft(&period, "Close revenue accounts", closed_by, lines);
                let entry = post_to_txn(&mut txn, draft.into_entry(Utc::now()), self.config.balance_tolerance)?;
                closing_entries.push(entry);
            } else {
                warn!("no income summary account, skipping revenue close");
            }
        }

        // Expense close: credit each expense account down to zero,
        // debit Income Summary with the total.
        let expense_balances = type_balances(&txn, AccountType::Expense, period_end);
        let total_expenses: Decimal = expense_balances.iter().map(|(_, balance)| balance).sum();
        if !total_expenses.is_zero() {
            if let Some(income_summary) = &income_summary {
                let mut lines: Vec<JournalLineInput> = expense_balances
                    .iter()
                    .map(|(account, balance)| JournalLineInput::signed(account.id, -*balance))
                    .collect();
                lines.push(JournalLineInput::signed(income_summary.id, total_expenses));
                let draft =
                    closing_draft(&period, "Close expense accounts", closed_by, lines);
                let entry = post_to_txn(&mut txn, draft.into_entry(Utc::now()), self.config.balance_tolerance)?;
                closing_entries.push(entry);
            } else {
                warn!("no income summary account, skipping expense close");
            }
        }

        // Transfer net income out of Income Summary.
        let net_income = total_revenue - total_expenses;
        if !net_income.is_zero() {
            match (&income_summary, &retained_earnings) {
                (Some(income_summary), Some(retained_earnings)) => {
                    let lines = vec![
                        JournalLineInput::signed(income_summary.id, net_income),
                        JournalLineInput::signed(retained_earnings.id, -net_income),
                    ];
                    let draft = closing_draft(
                        &period,
                        "Close income summary to retained earnings",
                        closed_by,
                        lines,
                    );
                    let entry = post_to_txn(&mut txn, draft.into_entry(Utc::now()), self.config.balance_tolerance)?;
                    closing_entries.push(entry);
                }
                _ => {
                    warn!("missing closing account, skipping retained earnings transfer");
                }
            }
        }

        period.close(Utc::now(), closed_by);
        txn.put_period(period.clone());
        txn.commit()?;

        info!(
            period = %period.name,
            %total_revenue,
            %total_expenses,
            %net_income,
            "accounting period closed"
        );

        Ok(PeriodCloseSummary {
            period,
            adjusting_entries,
            closing_entries,
            total_revenue,
            total_expenses,
            net_income,
        })
    }

    /// Resolves a closing account by role, falling back to the
    /// configured name fragment for charts that predate roles.
    fn closing_account<T: LedgerTxn>(
        &self,
        txn: &T,
        role: AccountRole,
        fragment: &str,
    ) -> Option<Account> {
        txn.account_by_role(role)
            .or_else(|| txn.find_account_by_name_fragment(fragment))
    }
}

/// Per-account balances for one account type as of a date, skipping
/// zero balances. Ordered by account code.
fn type_balances<T: LedgerTxn>(
    txn: &T,
    account_type: AccountType,
    as_of: NaiveDate,
) -> Vec<(Account, Decimal)> {
    let lines = txn.posted_lines(as_of);
    txn.accounts_by_type(account_type)
        .into_iter()
        .filter_map(|account| {
            let normal = account.normal_balance();
            let balance: Decimal = lines
                .iter()
                .filter(|line| line.account_id == account.id)
                .map(|line| normal.balance_change(line.debit, line.credit))
                .sum();
            (!balance.is_zero()).then_some((account, balance))
        })
        .collect()
}

/// A closing entry draft dated at the period end.
fn closing_draft(
    period: &AccountingPeriod,
    description: &str,
    created_by: UserId,
    lines: Vec<JournalLineInput>,
) -> JournalEntryDraft {
    let mut draft = JournalEntryDraft::new(
        period.business_id,
        period.end_date,
        description,
        created_by,
    );
    draft.is_closing = true;
    draft.accounting_period_id = Some(period.id);
    draft.lines = lines;
    draft
}
