//! Account types for the chart of accounts
//!
//! This module defines the account structure for double-entry bookkeeping.

use serde::{Deserialize, Serialize};

use core_kernel::LedgerAccountId;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// Category of account for financial reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCategory {
    /// Cash and bank accounts
    Cash,
    /// Accounts receivable
    Receivables,
    /// Jewelry, stones, and metal stock
    Inventory,
    /// Fixed assets and accumulated depreciation
    FixedAssets,
    /// Accounts payable
    Payables,
    /// Customer deposits on custom orders
    CustomerDeposits,
    /// Sales and repair revenue
    SalesIncome,
    /// Gains and losses on asset disposal
    DisposalResult,
    /// Cost of goods sold
    CostOfGoods,
    /// Depreciation expense
    DepreciationExpense,
    /// Operating expense
    OperatingExpense,
    /// Other
    Other,
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Unique identifier
    pub id: LedgerAccountId,
    /// Account code (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Account category
    pub category: Option<AccountCategory>,
    /// Description
    pub description: Option<String>,
    /// Whether account is active
    pub is_active: bool,
}

impl LedgerAccount {
    /// Creates a new account
    pub fn new(
        id: LedgerAccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            account_type,
            category: None,
            description: None,
            is_active: true,
        }
    }

    /// Sets the account category
    pub fn with_category(mut self, category: AccountCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the account inactive
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Standard chart of accounts for a jewelry shop
pub struct JewelryChartOfAccounts;

impl JewelryChartOfAccounts {
    /// Creates the standard accounts a shop starts with
    pub fn standard_accounts() -> Vec<LedgerAccount> {
        vec![
            // Assets
            LedgerAccount::new(LedgerAccountId::new(), "1000", "Cash", AccountType::Asset)
                .with_category(AccountCategory::Cash),
            LedgerAccount::new(LedgerAccountId::new(), "1010", "Bank", AccountType::Asset)
                .with_category(AccountCategory::Cash),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "1100",
                "Accounts Receivable",
                AccountType::Asset,
            )
            .with_category(AccountCategory::Receivables),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "1200",
                "Inventory - Finished Jewelry",
                AccountType::Asset,
            )
            .with_category(AccountCategory::Inventory),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "1210",
                "Inventory - Stones and Metals",
                AccountType::Asset,
            )
            .with_category(AccountCategory::Inventory),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "1500",
                "Fixed Assets",
                AccountType::Asset,
            )
            .with_category(AccountCategory::FixedAssets),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "1510",
                "Accumulated Depreciation",
                AccountType::Asset,
            )
            .with_category(AccountCategory::FixedAssets)
            .with_description("Contra-asset; carries a credit balance"),
            // Liabilities
            LedgerAccount::new(
                LedgerAccountId::new(),
                "2000",
                "Accounts Payable",
                AccountType::Liability,
            )
            .with_category(AccountCategory::Payables),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "2100",
                "Customer Deposits",
                AccountType::Liability,
            )
            .with_category(AccountCategory::CustomerDeposits),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "2200",
                "Sales Tax Payable",
                AccountType::Liability,
            ),
            // Equity
            LedgerAccount::new(
                LedgerAccountId::new(),
                "3000",
                "Retained Earnings",
                AccountType::Equity,
            ),
            // Revenue
            LedgerAccount::new(
                LedgerAccountId::new(),
                "4000",
                "Sales Revenue",
                AccountType::Revenue,
            )
            .with_category(AccountCategory::SalesIncome),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "4100",
                "Repair Revenue",
                AccountType::Revenue,
            )
            .with_category(AccountCategory::SalesIncome),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "4200",
                "Custom Order Revenue",
                AccountType::Revenue,
            )
            .with_category(AccountCategory::SalesIncome),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "4900",
                "Gain on Asset Disposal",
                AccountType::Revenue,
            )
            .with_category(AccountCategory::DisposalResult),
            // Expenses
            LedgerAccount::new(
                LedgerAccountId::new(),
                "5000",
                "Cost of Goods Sold",
                AccountType::Expense,
            )
            .with_category(AccountCategory::CostOfGoods),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "5100",
                "Depreciation Expense",
                AccountType::Expense,
            )
            .with_category(AccountCategory::DepreciationExpense),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "5200",
                "Operating Expense",
                AccountType::Expense,
            )
            .with_category(AccountCategory::OperatingExpense),
            LedgerAccount::new(
                LedgerAccountId::new(),
                "5900",
                "Loss on Asset Disposal",
                AccountType::Expense,
            )
            .with_category(AccountCategory::DisposalResult),
        ]
    }
}
