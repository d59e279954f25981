//! Bank accounts
//!
//! Each tenant keeps one or more bank accounts; exactly one active account
//! is the default at any time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BankAccountId, Currency, Money, TenantId};

use crate::error::BankingError;

/// A bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Unique identifier
    pub id: BankAccountId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Display name ("Operating checking")
    pub name: String,
    /// Account number at the bank
    pub account_number: String,
    /// Currency
    pub currency: Currency,
    /// Balance when the account was added
    pub opening_balance: Money,
    /// Current book balance
    pub current_balance: Money,
    /// Balance confirmed by the last completed reconciliation
    pub reconciled_balance: Money,
    /// Date of the last completed reconciliation
    pub last_reconciled_date: Option<NaiveDate>,
    /// Whether this is the tenant's default account
    pub is_default: bool,
    /// Whether the account is active
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Creates a new active account
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        account_number: impl Into<String>,
        opening_balance: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BankAccountId::new_v7(),
            tenant_id,
            name: name.into(),
            account_number: account_number.into(),
            currency: opening_balance.currency(),
            opening_balance,
            current_balance: opening_balance,
            reconciled_balance: opening_balance,
            last_reconciled_date: None,
            is_default: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records the outcome of a completed reconciliation
    pub(crate) fn record_reconciliation(&mut self, balance: Money, date: NaiveDate) {
        self.reconciled_balance = balance;
        self.last_reconciled_date = Some(date);
        self.touch();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.is_default = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Adds an account to a tenant's set, auto-defaulting the first active one
///
/// # Errors
///
/// Rejects accounts belonging to another tenant.
pub fn add_account(
    accounts: &mut Vec<BankAccount>,
    tenant_id: TenantId,
    mut account: BankAccount,
) -> Result<BankAccountId, BankingError> {
    if account.tenant_id != tenant_id {
        return Err(BankingError::TenantMismatch {
            expected: tenant_id.to_string(),
            actual: account.tenant_id.to_string(),
        });
    }

    let has_default = accounts.iter().any(|a| a.is_default && a.is_active);
    if !has_default && account.is_active {
        account.is_default = true;
    }

    let id = account.id;
    accounts.push(account);
    Ok(id)
}

/// Makes one account the tenant's default, unsetting any prior default
///
/// # Errors
///
/// The target must exist in the slice and be active.
pub fn set_default(
    accounts: &mut [BankAccount],
    target: BankAccountId,
) -> Result<(), BankingError> {
    let target_account = accounts
        .iter()
        .find(|a| a.id == target)
        .ok_or_else(|| BankingError::AccountNotFound(target.to_string()))?;
    if !target_account.is_active {
        return Err(BankingError::AccountInactive(target.to_string()));
    }

    for account in accounts.iter_mut() {
        let make_default = account.id == target;
        if account.is_default != make_default {
            account.is_default = make_default;
            account.touch();
        }
    }

    Ok(())
}
