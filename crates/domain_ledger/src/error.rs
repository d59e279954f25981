//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Account is inactive
    #[error("Account is inactive: {0}")]
    AccountInactive(String),

    /// Journal entry not found
    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),

    /// Entry has fewer than two postings
    #[error("Entry needs at least two postings, got {0}")]
    TooFewPostings(usize),

    /// A posting amount is zero or negative
    #[error("Posting amount must be positive, got {amount} on account {account}")]
    NonPositivePosting { account: String, amount: Decimal },

    /// Entry debits and credits do not balance
    #[error("Unbalanced entry: debits={debits}, credits={credits}")]
    UnbalancedEntry { debits: Decimal, credits: Decimal },

    /// Entry moves no money at all
    #[error("Entry total must be non-zero")]
    ZeroTotal,

    /// Calculation error
    #[error("Calculation error: {0}")]
    CalculationError(String),
}
