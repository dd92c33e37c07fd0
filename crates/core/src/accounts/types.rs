//! Account domain types.

use folio_shared::types::{AccountId, BusinessId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::balance::NormalBalance;

/// Account type classification.
///
/// A closed enumeration; every type carries its normal-balance side so
/// call sites never match on type strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned by the business.
    Asset,
    /// Obligations owed to others.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned from operations.
    Revenue,
    /// Costs incurred in operations.
    Expense,
}

impl AccountType {
    /// The side on which accounts of this type naturally increase.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true for temporary accounts zeroed out at period close.
    #[must_use]
    pub const fn is_temporary(self) -> bool {
        matches!(self, Self::Revenue | Self::Expense)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// System role an account can play during period closing.
///
/// Roles are resolved once per close instead of re-deriving the closing
/// accounts by name search on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Temporary clearing account used to net revenue against expense.
    IncomeSummary,
    /// Equity account receiving net income at period close.
    RetainedEarnings,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Business this account belongs to.
    pub business_id: BusinessId,
    /// Account code (unique within the business).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Optional reporting category (free-form).
    pub category: Option<String>,
    /// Optional system role for closing.
    pub role: Option<AccountRole>,
    /// Whether the account accepts new postings.
    pub is_active: bool,
    /// Running balance, maintained by the poster. Derived, not
    /// authoritative; the posted lines are.
    pub balance: Decimal,
}

impl Account {
    /// Creates an active account with a zero balance.
    #[must_use]
    pub fn new(
        business_id: BusinessId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: AccountId::new(),
            business_id,
            code: code.into(),
            name: name.into(),
            account_type,
            category: None,
            role: None,
            is_active: true,
            balance: Decimal::ZERO,
        }
    }

    /// Assigns a system role.
    #[must_use]
    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Assigns a reporting category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The side on which this account naturally increases.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance_table() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_temporary_accounts() {
        assert!(AccountType::Revenue.is_temporary());
        assert!(AccountType::Expense.is_temporary());
        assert!(!AccountType::Asset.is_temporary());
        assert!(!AccountType::Liability.is_temporary());
        assert!(!AccountType::Equity.is_temporary());
    }

    #[test]
    fn test_new_account_is_active_and_empty() {
        let account = Account::new(BusinessId::new(), "1000", "Cash", AccountType::Asset);
        assert!(account.is_active);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.role, None);
    }

    #[test]
    fn test_with_role_and_category() {
        let account = Account::new(BusinessId::new(), "3900", "Income Summary", AccountType::Equity)
            .with_role(AccountRole::IncomeSummary)
            .with_category("equity");
        assert_eq!(account.role, Some(AccountRole::IncomeSummary));
        assert_eq!(account.category.as_deref(), Some("equity"));
    }
}
