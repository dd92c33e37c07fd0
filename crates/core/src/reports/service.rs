//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    IncomeStatementReport, IncomeStatementSection, TrialBalanceReport, TrialBalanceRow,
    TrialBalanceTotals,
};
use crate::accounts::AccountType;
use crate::ledger::balance::AccountActivity;

/// Service for generating financial reports.
///
/// Pure over pre-aggregated account activity; the posting service owns
/// the aggregation.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from account activity.
    ///
    /// Because every posted entry balances, the two column totals are
    /// equal for any input produced by the poster; `is_balanced` lets
    /// callers assert it.
    #[must_use]
    pub fn trial_balance(activities: Vec<AccountActivity>, as_of: NaiveDate) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = activities
            .into_iter()
            .filter(|activity| !activity.net().is_zero())
            .map(|activity| {
                let net = activity.net();
                let (debit, credit) = if net.is_sign_negative() {
                    (Decimal::ZERO, -net)
                } else {
                    (net, Decimal::ZERO)
                };
                TrialBalanceRow {
                    account_id: activity.account_id,
                    code: activity.code,
                    name: activity.name,
                    debit,
                    credit,
                }
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.credit).sum();

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates an income statement from account activity over a
    /// date range.
    #[must_use]
    pub fn income_statement(
        activities: Vec<AccountActivity>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> IncomeStatementReport {
        let mut revenue = IncomeStatementSection::default();
        let mut expenses = IncomeStatementSection::default();

        for activity in activities {
            match activity.account_type {
                AccountType::Revenue => {
                    revenue.total += activity.balance();
                    revenue.accounts.push(activity);
                }
                AccountType::Expense => {
                    expenses.total += activity.balance();
                    expenses.accounts.push(activity);
                }
                _ => {}
            }
        }

        let net_income = revenue.total - expenses.total;

        IncomeStatementReport {
            period_start,
            period_end,
            revenue,
            expenses,
            net_income,
        }
    }
}
