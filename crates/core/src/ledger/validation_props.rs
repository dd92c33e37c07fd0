//! Property-based tests for ledger entry validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::{AccountId, BusinessId, UserId};

use super::error::LedgerError;
use super::types::{JournalEntryDraft, JournalLineInput};
use super::validation::validate_entry;
use crate::accounts::{Account, AccountType};
use crate::fiscal::period::AccountingPeriod;

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate amount pairs for balanced two-line entries.
fn balanced_pairs(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

fn any_account(id: AccountId) -> Option<Account> {
    let mut account = Account::new(BusinessId::new(), "1000", "Test", AccountType::Asset);
    account.id = id;
    Some(account)
}

fn no_period(_date: NaiveDate) -> Option<AccountingPeriod> {
    None
}

fn make_draft(lines: Vec<JournalLineInput>) -> JournalEntryDraft {
    let mut draft = JournalEntryDraft::new(
        BusinessId::new(),
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        "Property test entry",
        UserId::new(),
    );
    draft.lines = lines;
    draft
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any set of matched debit/credit amounts, the entry
    /// validates and the totals agree with the inputs.
    #[test]
    fn prop_matched_legs_always_validate(amounts in balanced_pairs(10)) {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in &amounts {
            lines.push(JournalLineInput::debit(AccountId::new(), *amount));
            lines.push(JournalLineInput::credit(AccountId::new(), *amount));
        }
        let expected: Decimal = amounts.iter().copied().sum();

        let totals = validate_entry(&make_draft(lines), any_account, no_period, tolerance())
            .expect("balanced entry should validate");
        prop_assert_eq!(totals.debit_total, expected);
        prop_assert_eq!(totals.credit_total, expected);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// For any imbalance beyond the tolerance, validation fails with
    /// the signed difference.
    #[test]
    fn prop_imbalance_is_rejected_with_delta(
        amount in positive_amount(),
        extra_cents in 2i64..1_000_000i64,
    ) {
        let extra = Decimal::new(extra_cents, 2);
        let lines = vec![
            JournalLineInput::debit(AccountId::new(), amount + extra),
            JournalLineInput::credit(AccountId::new(), amount),
        ];

        let err = validate_entry(&make_draft(lines), any_account, no_period, tolerance())
            .expect_err("imbalance beyond tolerance must fail");
        match err {
            LedgerError::Unbalanced { delta } => prop_assert_eq!(delta, extra),
            other => prop_assert!(false, "expected Unbalanced, got {other:?}"),
        }
    }

    /// A line with both sides set fails regardless of the amounts.
    #[test]
    fn prop_both_sides_always_ambiguous(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        let lines = vec![
            JournalLineInput::debit(AccountId::new(), debit + credit),
            JournalLineInput {
                account_id: AccountId::new(),
                debit,
                credit,
                description: None,
            },
        ];

        let result = validate_entry(&make_draft(lines), any_account, no_period, tolerance());
        let is_ambiguous_line_1 = matches!(result, Err(LedgerError::AmbiguousLine { index: 1 }));
        prop_assert!(is_ambiguous_line_1);
    }

    /// Validation is pure: the same draft gives the same verdict twice.
    #[test]
    fn prop_validation_deterministic(amounts in balanced_pairs(5)) {
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(JournalLineInput::debit(AccountId::new(), *amount));
            lines.push(JournalLineInput::credit(AccountId::new(), *amount));
        }
        let draft = make_draft(lines);

        let first = validate_entry(&draft, any_account, no_period, tolerance()).is_ok();
        let second = validate_entry(&draft, any_account, no_period, tolerance()).is_ok();
        prop_assert_eq!(first, second);
    }
}
