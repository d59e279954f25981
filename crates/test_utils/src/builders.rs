//! Test data builders
//!
//! Builder patterns for constructing test entities with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{
    BankAccountId, Currency, Money, PartyId, SequenceProvider, TenantId,
};
use domain_assets::{DepreciationMethod, FixedAsset};
use domain_banking::{BankTransaction, TransactionDirection};
use domain_billing::{BillingDocument, Counterparty, DocumentKind};

use crate::fixtures::DateFixtures;

/// Builder for test fixed assets
pub struct AssetBuilder {
    tenant_id: TenantId,
    name: String,
    acquisition_date: NaiveDate,
    cost: Money,
    salvage: Money,
    life_months: u32,
    method: DepreciationMethod,
}

impl Default for AssetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetBuilder {
    /// A straight-line display case: cost 5000.00, salvage 500.00, 60 months
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new(),
            name: "Display case".to_string(),
            acquisition_date: DateFixtures::acquisition(),
            cost: Money::new(dec!(5000.00), Currency::USD),
            salvage: Money::new(dec!(500.00), Currency::USD),
            life_months: 60,
            method: DepreciationMethod::StraightLine,
        }
    }

    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_salvage(mut self, salvage: Money) -> Self {
        self.salvage = salvage;
        self
    }

    pub fn with_life_months(mut self, months: u32) -> Self {
        self.life_months = months;
        self
    }

    pub fn with_method(mut self, method: DepreciationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn build(self) -> FixedAsset {
        FixedAsset::new(
            self.tenant_id,
            self.name,
            self.acquisition_date,
            self.cost,
            self.salvage,
            self.life_months,
            self.method,
        )
        .expect("builder defaults produce a valid asset")
    }
}

/// Builder for test billing documents
pub struct DocumentBuilder {
    tenant_id: TenantId,
    kind: DocumentKind,
    counterparty: Counterparty,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: Currency,
}

impl DocumentBuilder {
    /// An invoice issued 2026-08-01, due at month end
    pub fn invoice() -> Self {
        Self {
            tenant_id: TenantId::new(),
            kind: DocumentKind::Invoice,
            counterparty: Counterparty::new(PartyId::new(), "Walk-in customer"),
            issue_date: DateFixtures::statement_start(),
            due_date: DateFixtures::statement_end(),
            currency: Currency::USD,
        }
    }

    /// A supplier bill issued 2026-08-01, due at month end
    pub fn bill() -> Self {
        Self {
            kind: DocumentKind::Bill,
            counterparty: Counterparty::new(PartyId::new(), "Golden Gems Wholesale"),
            ..Self::invoice()
        }
    }

    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_counterparty(mut self, counterparty: Counterparty) -> Self {
        self.counterparty = counterparty;
        self
    }

    pub fn with_dates(mut self, issue: NaiveDate, due: NaiveDate) -> Self {
        self.issue_date = issue;
        self.due_date = due;
        self
    }

    pub fn build(self, sequences: &mut dyn SequenceProvider) -> BillingDocument {
        BillingDocument::new(
            self.tenant_id,
            self.kind,
            self.counterparty,
            self.issue_date,
            self.due_date,
            self.currency,
            sequences,
        )
        .expect("builder defaults produce a valid document")
    }
}

/// Builder for test bank transactions
pub struct BankTransactionBuilder {
    bank_account_id: BankAccountId,
    tenant_id: TenantId,
    date: NaiveDate,
    description: String,
    amount: Money,
    direction: TransactionDirection,
    adjustment: bool,
}

impl BankTransactionBuilder {
    /// A credit (money in) on the given account
    pub fn deposit(bank_account_id: BankAccountId, tenant_id: TenantId, amount: Money) -> Self {
        Self {
            bank_account_id,
            tenant_id,
            date: DateFixtures::ymd(2026, 8, 5),
            description: "Deposit".to_string(),
            amount,
            direction: TransactionDirection::Credit,
            adjustment: false,
        }
    }

    /// A debit (money out) on the given account
    pub fn withdrawal(bank_account_id: BankAccountId, tenant_id: TenantId, amount: Money) -> Self {
        Self {
            direction: TransactionDirection::Debit,
            description: "Withdrawal".to_string(),
            ..Self::deposit(bank_account_id, tenant_id, amount)
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn adjustment(mut self) -> Self {
        self.adjustment = true;
        self
    }

    pub fn build(self) -> BankTransaction {
        let txn = BankTransaction::new(
            self.bank_account_id,
            self.tenant_id,
            self.date,
            self.description,
            self.amount,
            self.direction,
        )
        .expect("builder defaults produce a valid transaction");
        if self.adjustment {
            txn.as_adjustment()
        } else {
            txn
        }
    }
}

/// Scalar decimal shorthand used throughout the suites
pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}
