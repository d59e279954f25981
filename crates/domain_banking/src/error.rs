//! Banking domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the banking domain
#[derive(Debug, Error)]
pub enum BankingError {
    /// Bank account not found
    #[error("Bank account not found: {0}")]
    AccountNotFound(String),

    /// Bank account is inactive
    #[error("Bank account is inactive: {0}")]
    AccountInactive(String),

    /// Reconciliation already completed
    #[error("Reconciliation {0} is already completed")]
    AlreadyCompleted(String),

    /// Reconciliation is no longer in progress
    #[error("Reconciliation {reconciliation} is {status}; cannot {operation}")]
    NotInProgress {
        reconciliation: String,
        status: String,
        operation: &'static str,
    },

    /// Transaction is already reconciled
    #[error("Transaction {0} is already reconciled")]
    AlreadyReconciled(String),

    /// Transaction is not reconciled
    #[error("Transaction {0} is not reconciled")]
    NotReconciled(String),

    /// Unreconciling requires a reason for the audit trail
    #[error("A reason is required to unreconcile a transaction")]
    ReasonRequired,

    /// Amounts are signed through direction, not the amount field
    #[error("Transaction amount cannot be negative: {0}")]
    NegativeAmount(String),

    /// Entities from different tenants were mixed
    #[error("Tenant mismatch: expected {expected}, got {actual}")]
    TenantMismatch { expected: String, actual: String },

    /// Money arithmetic error
    #[error(transparent)]
    Money(#[from] MoneyError),
}
