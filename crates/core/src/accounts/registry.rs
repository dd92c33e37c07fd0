//! Account registry contract.

use folio_shared::types::{AccountId, BusinessId};

use super::types::{Account, AccountRole, AccountType};

/// Read access to the chart of accounts.
///
/// The registry is the single source of truth for account types and
/// roles consulted by validation and closing logic. Lookups that drive
/// posting (`account_by_role`, `find_account_by_name_fragment`) only
/// consider active accounts.
pub trait AccountRegistry {
    /// Returns the account with the given id, if any.
    fn account(&self, id: AccountId) -> Option<Account>;

    /// Returns true if the account exists and is active.
    fn is_active(&self, id: AccountId) -> bool {
        self.account(id).is_some_and(|a| a.is_active)
    }

    /// Lists a business's accounts of the given type, ordered by code.
    fn accounts_by_type(&self, business_id: BusinessId, account_type: AccountType)
    -> Vec<Account>;

    /// Finds the active account carrying the given role.
    fn account_by_role(&self, business_id: BusinessId, role: AccountRole) -> Option<Account>;

    /// Finds an active account whose name contains the fragment,
    /// case-insensitively. Legacy fallback for charts without roles;
    /// ties break on the lowest code.
    fn find_account_by_name_fragment(
        &self,
        business_id: BusinessId,
        fragment: &str,
    ) -> Option<Account>;
}
