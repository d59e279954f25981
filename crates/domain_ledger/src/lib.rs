//! Ledger Domain - Double-Entry Journal
//!
//! This crate implements strict double-entry bookkeeping for the jewelry
//! shop system, ensuring financial integrity for all monetary movements.
//!
//! # Double-Entry Accounting Principles
//!
//! Every journal entry creates balanced debits and credits:
//! - Debits increase asset/expense accounts
//! - Credits increase liability/equity/revenue accounts
//! - The sum of all debits must equal the sum of all credits, exactly
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{Journal, EntryDraft};
//!
//! let mut journal = Journal::new(Currency::USD);
//!
//! // Record a ring sale
//! let draft = EntryDraft::new("Ring sale, walk-in")
//!     .debit(cash_account, sale_amount)
//!     .credit(sales_revenue, sale_amount);
//!
//! journal.post(draft)?;
//! ```

pub mod account;
pub mod error;
pub mod journal;
pub mod posting;

pub use account::{AccountCategory, AccountType, JewelryChartOfAccounts, LedgerAccount};
pub use error::LedgerError;
pub use journal::{Journal, JournalEntry, TrialBalance, TrialBalanceLine};
pub use posting::{EntryDraft, Posting, PostingSide};
