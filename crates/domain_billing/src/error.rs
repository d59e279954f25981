//! Billing domain errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

use crate::document::{DocumentEvent, DocumentStatus};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Payment or line amount is structurally invalid
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payment would exceed the remaining balance
    #[error("Payment of {amount} exceeds balance due of {due}")]
    ExceedsBalanceDue { amount: Decimal, due: Decimal },

    /// The requested transition is illegal in the current status
    #[error("Cannot apply {event:?} to a document in status {status:?}")]
    InvalidTransition {
        status: DocumentStatus,
        event: DocumentEvent,
    },

    /// Line items and tax can only change while drafting
    #[error("Document is no longer editable in status {0:?}")]
    NotEditable(DocumentStatus),

    /// Due date precedes the issue date
    #[error("Due date {due} precedes issue date {issue}")]
    DueBeforeIssue { issue: NaiveDate, due: NaiveDate },

    /// A payment record was applied twice
    #[error("Payment already applied: {0}")]
    PaymentAlreadyApplied(String),

    /// A payment record was applied to the wrong document
    #[error("Payment {payment} does not belong to document {document}")]
    PaymentDocumentMismatch { payment: String, document: String },

    /// Credit memo does not have enough remaining value
    #[error("Credit application of {requested} exceeds available credit of {available}")]
    InsufficientCredit {
        requested: Decimal,
        available: Decimal,
    },

    /// Credit memo is not open for application
    #[error("Credit memo is not open: {0}")]
    CreditNotOpen(String),

    /// Entities from different tenants were mixed
    #[error("Tenant mismatch: expected {expected}, got {actual}")]
    TenantMismatch { expected: String, actual: String },

    /// Money arithmetic error
    #[error(transparent)]
    Money(#[from] MoneyError),
}
