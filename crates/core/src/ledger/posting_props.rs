//! Property-based tests for the posting service.
//!
//! - Running balance consistency: re-aggregation equals the
//!   incrementally maintained balance after any sequence of posts.
//! - Trial balance integrity: column totals are exactly equal for any
//!   set of posted entries.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::{AccountId, BusinessId, UserId};

use super::memory::MemoryLedger;
use super::posting::JournalService;
use super::types::{JournalEntryDraft, JournalLineInput};
use crate::accounts::{Account, AccountRegistry, AccountType};

const CHART: [(&str, &str, AccountType); 5] = [
    ("1000", "Cash", AccountType::Asset),
    ("2000", "Accounts Payable", AccountType::Liability),
    ("3000", "Owner Equity", AccountType::Equity),
    ("4000", "Sales Revenue", AccountType::Revenue),
    ("5000", "Rent Expense", AccountType::Expense),
];

/// One generated posting: debit leg, credit leg, amount in cents.
#[derive(Debug, Clone)]
struct GeneratedPosting {
    debit_index: usize,
    credit_index: usize,
    cents: i64,
}

fn posting_strategy() -> impl Strategy<Value = GeneratedPosting> {
    (0..CHART.len(), 0..CHART.len(), 1i64..1_000_000i64).prop_map(
        |(debit_index, credit_index, cents)| GeneratedPosting {
            debit_index,
            credit_index,
            cents,
        },
    )
}

struct Ledger {
    store: Arc<MemoryLedger>,
    service: JournalService<MemoryLedger>,
    business_id: BusinessId,
    accounts: Vec<AccountId>,
}

fn build_ledger() -> Ledger {
    let store = Arc::new(MemoryLedger::new());
    let business_id = BusinessId::new();
    let mut accounts = Vec::with_capacity(CHART.len());
    for (code, name, account_type) in CHART {
        let account = Account::new(business_id, code, name, account_type);
        accounts.push(account.id);
        store.insert_account(account);
    }
    Ledger {
        service: JournalService::new(Arc::clone(&store)),
        store,
        business_id,
        accounts,
    }
}

fn post_all(ledger: &Ledger, postings: &[GeneratedPosting], date: NaiveDate) {
    let user = UserId::new();
    for posting in postings {
        // Same-account legs would collapse to a single-account entry;
        // still legal double-entry, so post it as-is.
        let draft =
            JournalEntryDraft::new(ledger.business_id, date, "Generated posting", user)
                .with_line(JournalLineInput::debit(
                    ledger.accounts[posting.debit_index],
                    Decimal::new(posting.cents, 2),
                ))
                .with_line(JournalLineInput::credit(
                    ledger.accounts[posting.credit_index],
                    Decimal::new(posting.cents, 2),
                ));
        ledger
            .service
            .post_new(draft)
            .expect("generated posting should be valid");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// For any sequence of postings, re-aggregating each account's
    /// lines reproduces the running balance the poster maintained.
    #[test]
    fn prop_reaggregation_matches_running_balance(
        postings in prop::collection::vec(posting_strategy(), 1..30),
    ) {
        let ledger = build_ledger();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        post_all(&ledger, &postings, date);

        for account_id in &ledger.accounts {
            let running = ledger.store.account(*account_id).unwrap().balance;
            let recomputed = ledger
                .service
                .account_balance(*account_id, date)
                .unwrap();
            prop_assert_eq!(recomputed, running, "account {} diverged", account_id);
        }
    }

    /// For any sequence of postings, the trial balance columns are
    /// exactly equal.
    #[test]
    fn prop_trial_balance_always_balances(
        postings in prop::collection::vec(posting_strategy(), 1..30),
    ) {
        let ledger = build_ledger();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        post_all(&ledger, &postings, date);

        let report = ledger.service.trial_balance(ledger.business_id, date);
        prop_assert!(report.totals.is_balanced);
        prop_assert_eq!(report.totals.total_debit, report.totals.total_credit);
    }

    /// Reversal restores every running balance to its prior value.
    #[test]
    fn prop_reversal_round_trips_balances(posting in posting_strategy()) {
        let ledger = build_ledger();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let user = UserId::new();

        let draft =
            JournalEntryDraft::new(ledger.business_id, date, "To be reversed", user)
                .with_line(JournalLineInput::debit(
                    ledger.accounts[posting.debit_index],
                    Decimal::new(posting.cents, 2),
                ))
                .with_line(JournalLineInput::credit(
                    ledger.accounts[posting.credit_index],
                    Decimal::new(posting.cents, 2),
                ));
        let entry = ledger.service.post_new(draft).unwrap();
        ledger.service.reverse(entry.id, Some(date), user).unwrap();

        for account_id in &ledger.accounts {
            let balance = ledger.store.account(*account_id).unwrap().balance;
            prop_assert_eq!(balance, Decimal::ZERO);
        }
    }
}
