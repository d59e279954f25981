//! Banking Domain - Accounts, Transactions, and Reconciliation
//!
//! Bank accounts carry opening/current/reconciled balances, with exactly
//! one default active account per tenant. Statement lines are matched into
//! a [`BankReconciliation`], which computes the statement-versus-book
//! variance and either completes or cancels - both terminal.

pub mod account;
pub mod error;
pub mod reconciliation;
pub mod transaction;

pub use account::{add_account, set_default, BankAccount};
pub use error::BankingError;
pub use reconciliation::{BankReconciliation, ReconciliationStatus};
pub use transaction::{BankTransaction, TransactionDirection};
